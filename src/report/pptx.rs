//! Minimal PresentationML writer.
//!
//! Produces a `.pptx` package with one master, one blank layout and a theme,
//! plus any number of slides made of filled shapes, text boxes and PNG
//! pictures. Geometry is given in points and converted to EMU on output.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::errors::ReportResult;

pub const EMU_PER_POINT: i64 = 12_700;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Position and size in points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Geometry {
    Rect,
    RoundRect,
}

impl Geometry {
    fn preset(&self) -> &'static str {
        match self {
            Geometry::Rect => "rect",
            Geometry::RoundRect => "roundRect",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub size_pt: f64,
    pub bold: bool,
    pub color: Option<Rgb>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    pub frame: Frame,
    pub text: String,
    pub style: TextStyle,
    pub align: Align,
    pub wrap: bool,
    pub anchor_middle: bool,
    /// Line spacing as a percentage of single spacing.
    pub line_spacing: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SlideElement {
    Shape {
        geometry: Geometry,
        frame: Frame,
        fill: Rgb,
        line: Rgb,
    },
    Text(TextBox),
    Picture {
        frame: Frame,
        media: usize,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slide {
    pub elements: Vec<SlideElement>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: SlideElement) {
        self.elements.push(element);
    }

    pub fn pictures(&self) -> impl Iterator<Item = usize> + '_ {
        self.elements.iter().filter_map(|e| match e {
            SlideElement::Picture { media, .. } => Some(*media),
            _ => None,
        })
    }
}

/// An in-memory deck, written out as a zip package by [`SlideDeck::save`].
#[derive(Clone, Debug)]
pub struct SlideDeck {
    width_pt: i32,
    height_pt: i32,
    title: String,
    created: DateTime<Utc>,
    media: Vec<Vec<u8>>,
    slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn new(width_pt: i32, height_pt: i32, title: impl Into<String>) -> Self {
        Self {
            width_pt,
            height_pt,
            title: title.into(),
            created: Utc::now(),
            media: Vec::new(),
            slides: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width_pt
    }

    pub fn height(&self) -> i32 {
        self.height_pt
    }

    /// Register PNG bytes and return the handle used by `SlideElement::Picture`.
    pub fn add_png(&mut self, bytes: Vec<u8>) -> usize {
        self.media.push(bytes);
        self.media.len() - 1
    }

    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn save(&self, path: &Path) -> ReportResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write + Seek>(&self, writer: W) -> ReportResult<()> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let put = |zip: &mut ZipWriter<W>, name: &str, bytes: &[u8]| -> ReportResult<()> {
            zip.start_file(name, options)?;
            zip.write_all(bytes)?;
            Ok(())
        };

        put(&mut zip, "[Content_Types].xml", &self.content_types()?)?;
        put(&mut zip, "_rels/.rels", ROOT_RELS.as_bytes())?;
        put(&mut zip, "docProps/core.xml", &self.core_props()?)?;
        put(&mut zip, "docProps/app.xml", &self.app_props()?)?;
        put(&mut zip, "ppt/presentation.xml", &self.presentation()?)?;
        put(&mut zip, "ppt/_rels/presentation.xml.rels", &self.presentation_rels()?)?;
        put(&mut zip, "ppt/presProps.xml", PRES_PROPS.as_bytes())?;
        put(&mut zip, "ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
        put(&mut zip, "ppt/slideMasters/_rels/slideMaster1.xml.rels", SLIDE_MASTER_RELS.as_bytes())?;
        put(&mut zip, "ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes())?;
        put(&mut zip, "ppt/slideLayouts/_rels/slideLayout1.xml.rels", SLIDE_LAYOUT_RELS.as_bytes())?;
        put(&mut zip, "ppt/theme/theme1.xml", THEME.as_bytes())?;

        for (idx, slide) in self.slides.iter().enumerate() {
            let number = idx + 1;
            put(&mut zip, &format!("ppt/slides/slide{}.xml", number), &slide_xml(slide)?)?;
            put(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &slide_rels(slide)?,
            )?;
        }

        for (idx, bytes) in self.media.iter().enumerate() {
            put(&mut zip, &format!("ppt/media/image{}.png", idx + 1), bytes)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn content_types(&self) -> ReportResult<Vec<u8>> {
        let mut xml = XmlOut::new()?;
        xml.open(
            "Types",
            &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
        )?;
        for (ext, ty) in [
            ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
            ("xml", "application/xml"),
            ("png", "image/png"),
        ] {
            xml.empty("Default", &[("Extension", ext), ("ContentType", ty)])?;
        }

        let mut overrides: Vec<(String, &str)> = vec![
            ("/ppt/presentation.xml".into(), "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"),
            ("/ppt/presProps.xml".into(), "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"),
            ("/ppt/slideMasters/slideMaster1.xml".into(), "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"),
            ("/ppt/slideLayouts/slideLayout1.xml".into(), "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"),
            ("/ppt/theme/theme1.xml".into(), "application/vnd.openxmlformats-officedocument.theme+xml"),
            ("/docProps/core.xml".into(), "application/vnd.openxmlformats-package.core-properties+xml"),
            ("/docProps/app.xml".into(), "application/vnd.openxmlformats-officedocument.extended-properties+xml"),
        ];
        for number in 1..=self.slides.len() {
            overrides.push((
                format!("/ppt/slides/slide{}.xml", number),
                "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
            ));
        }
        for (part, ty) in &overrides {
            xml.empty("Override", &[("PartName", part.as_str()), ("ContentType", *ty)])?;
        }
        xml.close("Types")?;
        Ok(xml.into_bytes())
    }

    fn core_props(&self) -> ReportResult<Vec<u8>> {
        let created = self.created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let mut xml = XmlOut::new()?;
        xml.open(
            "cp:coreProperties",
            &[
                ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
                ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
                ("xmlns:dcterms", "http://purl.org/dc/terms/"),
                ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ],
        )?;
        xml.text_element("dc:title", &[], &self.title)?;
        xml.text_element("dc:creator", &[], env!("CARGO_PKG_NAME"))?;
        xml.text_element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
        xml.text_element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
        xml.close("cp:coreProperties")?;
        Ok(xml.into_bytes())
    }

    fn app_props(&self) -> ReportResult<Vec<u8>> {
        let mut xml = XmlOut::new()?;
        xml.open(
            "Properties",
            &[("xmlns", "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties")],
        )?;
        xml.text_element("Application", &[], env!("CARGO_PKG_NAME"))?;
        xml.text_element("Slides", &[], &self.slides.len().to_string())?;
        xml.close("Properties")?;
        Ok(xml.into_bytes())
    }

    fn presentation(&self) -> ReportResult<Vec<u8>> {
        let mut xml = XmlOut::new()?;
        xml.open(
            "p:presentation",
            &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P), ("saveSubsetFonts", "1")],
        )?;
        xml.open("p:sldMasterIdLst", &[])?;
        xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
        xml.close("p:sldMasterIdLst")?;

        if !self.slides.is_empty() {
            xml.open("p:sldIdLst", &[])?;
            for idx in 0..self.slides.len() {
                let id = (256 + idx).to_string();
                let rel = format!("rId{}", idx + 4);
                xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel.as_str())])?;
            }
            xml.close("p:sldIdLst")?;
        }

        let cx = emu(self.width_pt).to_string();
        let cy = emu(self.height_pt).to_string();
        xml.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
        xml.close("p:presentation")?;
        Ok(xml.into_bytes())
    }

    fn presentation_rels(&self) -> ReportResult<Vec<u8>> {
        let mut rels = vec![
            ("rId1".to_string(), "slideMaster", "slideMasters/slideMaster1.xml".to_string()),
            ("rId2".to_string(), "theme", "theme/theme1.xml".to_string()),
            ("rId3".to_string(), "presProps", "presProps.xml".to_string()),
        ];
        for idx in 0..self.slides.len() {
            rels.push((format!("rId{}", idx + 4), "slide", format!("slides/slide{}.xml", idx + 1)));
        }
        relationships(&rels)
    }
}

fn emu(points: i32) -> i64 {
    points as i64 * EMU_PER_POINT
}

fn relationships(rels: &[(String, &str, String)]) -> ReportResult<Vec<u8>> {
    let mut xml = XmlOut::new()?;
    xml.open("Relationships", &[("xmlns", NS_RELS)])?;
    for (id, kind, target) in rels {
        let ty = format!("{}/{}", REL_BASE, kind);
        xml.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", ty.as_str()), ("Target", target.as_str())],
        )?;
    }
    xml.close("Relationships")?;
    Ok(xml.into_bytes())
}

fn slide_rels(slide: &Slide) -> ReportResult<Vec<u8>> {
    let mut rels = vec![(
        "rId1".to_string(),
        "slideLayout",
        "../slideLayouts/slideLayout1.xml".to_string(),
    )];
    for (idx, media) in slide.pictures().enumerate() {
        rels.push((format!("rId{}", idx + 2), "image", format!("../media/image{}.png", media + 1)));
    }
    relationships(&rels)
}

fn slide_xml(slide: &Slide) -> ReportResult<Vec<u8>> {
    let mut xml = XmlOut::new()?;
    xml.open("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
    xml.open("p:cSld", &[])?;
    xml.open("p:spTree", &[])?;

    xml.open("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.close("p:nvGrpSpPr")?;
    xml.open("p:grpSpPr", &[])?;
    xml.open("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml.close("a:xfrm")?;
    xml.close("p:grpSpPr")?;

    let mut picture_rel = 2;
    for (idx, element) in slide.elements.iter().enumerate() {
        let id = (idx + 2).to_string();
        match element {
            SlideElement::Shape {
                geometry,
                frame,
                fill,
                line,
            } => {
                xml.open("p:sp", &[])?;
                xml.open("p:nvSpPr", &[])?;
                xml.empty("p:cNvPr", &[("id", id.as_str()), ("name", format!("Shape {}", id).as_str())])?;
                xml.empty("p:cNvSpPr", &[])?;
                xml.empty("p:nvPr", &[])?;
                xml.close("p:nvSpPr")?;
                xml.open("p:spPr", &[])?;
                xml.xfrm(frame)?;
                xml.geometry(geometry.preset())?;
                xml.solid_fill(*fill)?;
                xml.open("a:ln", &[])?;
                xml.solid_fill(*line)?;
                xml.close("a:ln")?;
                xml.close("p:spPr")?;
                xml.close("p:sp")?;
            }
            SlideElement::Text(text_box) => {
                xml.text_box(&id, text_box)?;
            }
            SlideElement::Picture { frame, .. } => {
                let rel = format!("rId{}", picture_rel);
                picture_rel += 1;
                xml.open("p:pic", &[])?;
                xml.open("p:nvPicPr", &[])?;
                xml.empty("p:cNvPr", &[("id", id.as_str()), ("name", format!("Picture {}", id).as_str())])?;
                xml.open("p:cNvPicPr", &[])?;
                xml.empty("a:picLocks", &[("noChangeAspect", "1")])?;
                xml.close("p:cNvPicPr")?;
                xml.empty("p:nvPr", &[])?;
                xml.close("p:nvPicPr")?;
                xml.open("p:blipFill", &[])?;
                xml.empty("a:blip", &[("r:embed", rel.as_str())])?;
                xml.open("a:stretch", &[])?;
                xml.empty("a:fillRect", &[])?;
                xml.close("a:stretch")?;
                xml.close("p:blipFill")?;
                xml.open("p:spPr", &[])?;
                xml.xfrm(frame)?;
                xml.geometry("rect")?;
                xml.close("p:spPr")?;
                xml.close("p:pic")?;
            }
        }
    }

    xml.close("p:spTree")?;
    xml.close("p:cSld")?;
    xml.open("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.close("p:clrMapOvr")?;
    xml.close("p:sld")?;
    Ok(xml.into_bytes())
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> ReportResult<Self> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> ReportResult<()> {
        let mut elem = BytesStart::new(name);
        for attr in attrs {
            elem.push_attribute(*attr);
        }
        self.writer.write_event(Event::Start(elem))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> ReportResult<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> ReportResult<()> {
        let mut elem = BytesStart::new(name);
        for attr in attrs {
            elem.push_attribute(*attr);
        }
        self.writer.write_event(Event::Empty(elem))?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> ReportResult<()> {
        self.open(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    fn xfrm(&mut self, frame: &Frame) -> ReportResult<()> {
        let (x, y) = (emu(frame.x).to_string(), emu(frame.y).to_string());
        let (cx, cy) = (emu(frame.width).to_string(), emu(frame.height).to_string());
        self.open("a:xfrm", &[])?;
        self.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
        self.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        self.close("a:xfrm")
    }

    fn geometry(&mut self, preset: &str) -> ReportResult<()> {
        self.open("a:prstGeom", &[("prst", preset)])?;
        self.empty("a:avLst", &[])?;
        self.close("a:prstGeom")
    }

    fn solid_fill(&mut self, color: Rgb) -> ReportResult<()> {
        self.open("a:solidFill", &[])?;
        self.empty("a:srgbClr", &[("val", color.hex().as_str())])?;
        self.close("a:solidFill")
    }

    fn text_box(&mut self, id: &str, text_box: &TextBox) -> ReportResult<()> {
        self.open("p:sp", &[])?;
        self.open("p:nvSpPr", &[])?;
        self.empty("p:cNvPr", &[("id", id), ("name", format!("TextBox {}", id).as_str())])?;
        self.empty("p:cNvSpPr", &[("txBox", "1")])?;
        self.empty("p:nvPr", &[])?;
        self.close("p:nvSpPr")?;
        self.open("p:spPr", &[])?;
        self.xfrm(&text_box.frame)?;
        self.geometry("rect")?;
        self.empty("a:noFill", &[])?;
        self.close("p:spPr")?;

        self.open("p:txBody", &[])?;
        let wrap = if text_box.wrap { "square" } else { "none" };
        let anchor = if text_box.anchor_middle { "ctr" } else { "t" };
        self.open("a:bodyPr", &[("wrap", wrap), ("rtlCol", "0"), ("anchor", anchor)])?;
        self.empty("a:noAutofit", &[])?;
        self.close("a:bodyPr")?;
        self.empty("a:lstStyle", &[])?;

        self.open("a:p", &[])?;
        let algn = match text_box.align {
            Align::Left => "l",
            Align::Center => "ctr",
        };
        match text_box.line_spacing {
            Some(percent) => {
                let val = (percent * 1000).to_string();
                self.open("a:pPr", &[("algn", algn)])?;
                self.open("a:lnSpc", &[])?;
                self.empty("a:spcPct", &[("val", val.as_str())])?;
                self.close("a:lnSpc")?;
                self.close("a:pPr")?;
            }
            None => self.empty("a:pPr", &[("algn", algn)])?,
        }

        let style = &text_box.style;
        let size = ((style.size_pt * 100.0).round() as i64).to_string();
        let bold = if style.bold { "1" } else { "0" };
        self.open("a:r", &[])?;
        self.open(
            "a:rPr",
            &[("lang", "zh-CN"), ("altLang", "en-US"), ("sz", size.as_str()), ("b", bold), ("dirty", "0")],
        )?;
        if let Some(color) = style.color {
            self.solid_fill(color)?;
        }
        self.empty("a:latin", &[("typeface", style.font_family.as_str())])?;
        self.empty("a:ea", &[("typeface", style.font_family.as_str())])?;
        self.close("a:rPr")?;
        self.text_element("a:t", &[], &text_box.text)?;
        self.close("a:r")?;
        self.close("a:p")?;

        self.close("p:txBody")?;
        self.close("p:sp")
    }

    fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const PRES_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#;

const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst><p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles></p:sldMaster>"#;

const SLIDE_MASTER_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/></Relationships>"#;

const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#;

const SLIDE_LAYOUT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#;
