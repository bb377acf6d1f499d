//! PPT Deck Exporter
//! Writes the presentation as a PowerPoint file, one chart per slide with a
//! caption, using direct ZIP/XML generation (the high-level ppt crates do
//! not support image embedding).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

/// One exported slide: a caption plus a rendered PNG chart.
pub struct SlideImage {
    pub title: String,
    pub png: Vec<u8>,
}

/// EMU (English Metric Units) conversion: 914400 EMU = 1 inch
const EMU_PER_INCH: i64 = 914400;
/// Standard 16:9 slide dimensions (in EMU)
const SLIDE_WIDTH: i64 = 9144000; // 10 inches
const SLIDE_HEIGHT: i64 = 6858000; // 7.5 inches
/// Caption band across the top of each slide
const TITLE_HEIGHT: i64 = EMU_PER_INCH * 3 / 4;

/// PPTX generator for the enrollment deck.
pub struct PptGenerator;

impl PptGenerator {
    /// Write `slides` to `output_path` as a PPTX, one image per slide,
    /// captioned and centered under the title band.
    pub fn generate(slides: &[SlideImage], output_path: &Path, deck_title: &str) -> Result<()> {
        let file = File::create(output_path)
            .with_context(|| format!("creating {}", output_path.display()))?;
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default();
        let slide_count = slides.len();

        // Image box: full width under the caption, margins all around
        let margin = EMU_PER_INCH / 2;
        let img_x = margin;
        let img_y = TITLE_HEIGHT + margin / 2;
        let img_w = SLIDE_WIDTH - 2 * margin;
        let img_h = SLIDE_HEIGHT - img_y - margin;

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(Self::content_types_xml(slide_count).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(Self::rels_xml().as_bytes())?;

        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;
        zip.write_all(Self::presentation_rels_xml(slide_count).as_bytes())?;

        zip.start_file("ppt/presentation.xml", options)?;
        zip.write_all(Self::presentation_xml(slide_count).as_bytes())?;

        for (idx, slide) in slides.iter().enumerate() {
            let slide_num = idx + 1;

            zip.start_file(
                format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
                options,
            )?;
            zip.write_all(Self::slide_rels_xml(slide_num).as_bytes())?;

            zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)?;
            zip.write_all(
                Self::slide_xml(&slide.title, img_x, img_y, img_w, img_h).as_bytes(),
            )?;
        }

        zip.start_file("ppt/slideLayouts/slideLayout1.xml", options)?;
        zip.write_all(Self::slide_layout_xml().as_bytes())?;
        zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", options)?;
        zip.write_all(Self::layout_rels_xml().as_bytes())?;

        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;
        zip.write_all(Self::slide_master_xml().as_bytes())?;
        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;
        zip.write_all(Self::master_rels_xml().as_bytes())?;

        zip.start_file("ppt/theme/theme1.xml", options)?;
        zip.write_all(Self::theme_xml().as_bytes())?;

        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(Self::core_props_xml(deck_title).as_bytes())?;
        zip.start_file("docProps/app.xml", options)?;
        zip.write_all(Self::app_props_xml(slide_count).as_bytes())?;

        for (idx, slide) in slides.iter().enumerate() {
            zip.start_file(format!("ppt/media/image{}.png", idx + 1), options)?;
            zip.write_all(&slide.png)?;
        }

        zip.finish()?;

        log::info!(
            "PPT generated: {} ({} slides)",
            output_path.display(),
            slide_count
        );
        Ok(())
    }

    fn content_types_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Default Extension="png" ContentType="image/png"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#
        .to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                i
            ));
            xml.push('\n');
        }
        xml.push_str("</Types>");
        xml
    }

    fn rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
    }

    fn presentation_rels_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#
        .to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 2,
                i
            ));
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn presentation_xml(slide_count: usize) -> String {
        let mut slide_ids = String::new();
        for i in 1..=slide_count {
            slide_ids.push_str(&format!(
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                255 + i,
                i + 2
            ));
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst>{}</p:sldIdLst>
<p:sldSz cx="{}" cy="{}" type="screen16x9"/>
<p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            slide_ids, SLIDE_WIDTH, SLIDE_HEIGHT, SLIDE_HEIGHT, SLIDE_WIDTH
        )
    }

    fn slide_rels_xml(slide_num: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image{}.png"/>
</Relationships>"#,
            slide_num
        )
    }

    /// A caption text box across the top and the chart image below it.
    fn slide_xml(title: &str, x: i64, y: i64, w: i64, h: i64) -> String {
        let margin = EMU_PER_INCH / 2;
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld>
<p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
<p:sp>
<p:nvSpPr><p:cNvPr id="2" name="Caption"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
<p:spPr><a:xfrm><a:off x="{margin}" y="{caption_y}"/><a:ext cx="{caption_w}" cy="{caption_h}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="en-US" sz="2400" b="1"/><a:t>{title}</a:t></a:r></a:p></p:txBody>
</p:sp>
<p:pic>
<p:nvPicPr>
<p:cNvPr id="3" name="Chart"/>
<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
<p:nvPr/>
</p:nvPicPr>
<p:blipFill>
<a:blip r:embed="rId2"/>
<a:stretch><a:fillRect/></a:stretch>
</p:blipFill>
<p:spPr>
<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{w}" cy="{h}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</p:spPr>
</p:pic>
</p:spTree>
</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            margin = margin,
            caption_y = EMU_PER_INCH / 8,
            caption_w = SLIDE_WIDTH - 2 * margin,
            caption_h = TITLE_HEIGHT,
            title = escape_xml(title),
            x = x,
            y = y,
            w = w,
            h = h
        )
    }

    fn slide_layout_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
<p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#
    }

    fn layout_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#
    }

    fn slide_master_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#
    }

    fn master_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#
    }

    fn theme_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
<a:themeElements>
<a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme>
<a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>
<a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln><a:ln w="12700" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln><a:ln w="19050" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme>
</a:themeElements>
<a:objectDefaults/>
<a:extraClrSchemeLst/>
</a:theme>"#
    }

    fn core_props_xml(title: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>{}</dc:title>
<dc:creator>Enrollment Deck</dc:creator>
<cp:lastModifiedBy>Enrollment Deck</cp:lastModifiedBy>
<cp:revision>1</cp:revision>
</cp:coreProperties>"#,
            escape_xml(title)
        )
    }

    fn app_props_xml(slide_count: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<TotalTime>0</TotalTime>
<Words>0</Words>
<Application>Enrollment Deck</Application>
<PresentationFormat>On-screen Show (16:9)</PresentationFormat>
<Slides>{}</Slides>
<Notes>0</Notes>
<HiddenSlides>0</HiddenSlides>
<ScaleCrop>false</ScaleCrop>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>16.0000</AppVersion>
</Properties>"#,
            slide_count
        )
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_a_zip_container() {
        let slides = vec![
            SlideImage {
                title: "2013 - Engineering - Gender".to_string(),
                png: vec![0x89, b'P', b'N', b'G'],
            },
            SlideImage {
                title: "B<road> & Arts".to_string(),
                png: vec![0x89, b'P', b'N', b'G'],
            },
        ];
        let path = std::env::temp_dir().join("enrolldeck_ppt_test.pptx");
        PptGenerator::generate(&slides, &path, "Enrollment Statistics").unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn captions_are_xml_escaped() {
        let xml = PptGenerator::slide_xml("A & B <C>", 0, 0, 10, 10);
        assert!(xml.contains("A &amp; B &lt;C&gt;"));
        assert!(!xml.contains("A & B"));
    }
}
