//! Minimal well-formed documents built in memory for tests

use std::io::{Cursor, Write};

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Zip the given `(name, contents)` entries into an archive
pub fn zip_entries(entries: &[(&str, String)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        zip.start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

const SHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Workbook with "Sheet1" holding `[1, _, "x"]`, a whitespace row, a missing
/// row, `["after", 2.5]`, followed by an empty sheet named "Empty"
pub fn xlsx() -> Vec<u8> {
    workbook(
        &[
            (
                "Sheet1",
                r#"<row r="1"><c r="A1"><v>1</v></c><c r="C1" t="inlineStr"><is><t>x</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t xml:space="preserve">   </t></is></c></row>
<row r="4"><c r="A4" t="inlineStr"><is><t>after</t></is></c><c r="B4"><v>2.5</v></c></row>"#,
            ),
            ("Empty", ""),
        ],
        None,
    )
}

/// Workbook whose sheets are `(name, <row> elements)`; `cell_formats` lists
/// the `numFmtId` of each cell style, referenced from cells as `s="index"`
pub fn workbook(sheets: &[(&str, &str)], cell_formats: Option<&[u32]>) -> Vec<u8> {
    let overrides: String = (1..=sheets.len())
        .map(|i| {
            format!(
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i
            )
        })
        .collect();
    let content_types = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
{}</Types>"#,
        overrides
    );

    let root_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        REL_NS
    );

    let sheet_entries: String = sheets
        .iter()
        .enumerate()
        .map(|(i, (name, _))| {
            format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(name),
                i + 1,
                i + 1
            )
        })
        .collect();
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}"><sheets>{}</sheets></workbook>"#,
        SHEET_NS, REL_NS, sheet_entries
    );

    let sheet_rels: String = (1..=sheets.len())
        .map(|i| {
            format!(
                r#"<Relationship Id="rId{0}" Type="{1}/worksheet" Target="worksheets/sheet{0}.xml"/>"#,
                i, REL_NS
            )
        })
        .collect();
    let workbook_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}<Relationship Id="rId{}" Type="{}/styles" Target="styles.xml"/></Relationships>"#,
        sheet_rels,
        sheets.len() + 1,
        REL_NS
    );

    let xfs: String = cell_formats
        .unwrap_or(&[0])
        .iter()
        .map(|id| format!(r#"<xf numFmtId="{}" fontId="0" fillId="0" borderId="0" applyNumberFormat="1"/>"#, id))
        .collect();
    let styles = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="{}"><cellXfs count="{}">{}</cellXfs></styleSheet>"#,
        SHEET_NS,
        cell_formats.map_or(1, |f| f.len()),
        xfs
    );

    let mut entries = vec![
        ("[Content_Types].xml".to_string(), content_types),
        ("_rels/.rels".to_string(), root_rels),
        ("xl/workbook.xml".to_string(), workbook),
        ("xl/_rels/workbook.xml.rels".to_string(), workbook_rels),
        ("xl/styles.xml".to_string(), styles),
    ];
    for (i, (_, rows)) in sheets.iter().enumerate() {
        let sheet_data = if rows.is_empty() {
            "<sheetData/>".to_string()
        } else {
            format!("<sheetData>{}</sheetData>", rows)
        };
        entries.push((
            format!("xl/worksheets/sheet{}.xml", i + 1),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{}">{}</worksheet>"#,
                SHEET_NS, sheet_data
            ),
        ));
    }

    let borrowed: Vec<(&str, String)> = entries
        .iter()
        .map(|(name, xml)| (name.as_str(), xml.clone()))
        .collect();
    zip_entries(&borrowed)
}

/// Presentation with one slide per entry; each inner entry is one shape whose
/// lines become separate paragraphs
pub fn pptx(slides: &[&[&str]]) -> Vec<u8> {
    let slide_ids: String = (0..slides.len())
        .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 1))
        .collect();
    let presentation = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
        slide_ids
    );

    let rels_body: String = (0..slides.len())
        .map(|i| {
            format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 1,
                i + 1
            )
        })
        .collect();
    let rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        rels_body
    );

    let mut entries = vec![
        ("ppt/presentation.xml".to_string(), presentation),
        ("ppt/_rels/presentation.xml.rels".to_string(), rels),
    ];

    for (i, shapes) in slides.iter().enumerate() {
        let shapes_xml: String = shapes
            .iter()
            .enumerate()
            .map(|(n, text)| {
                let paragraphs: String = text
                    .split('\n')
                    .map(|line| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(line)))
                    .collect();
                format!(
                    r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Shape {}"/></p:nvSpPr><p:txBody><a:bodyPr/>{}</p:txBody></p:sp>"#,
                    n + 2,
                    n + 1,
                    paragraphs
                )
            })
            .collect();
        let slide = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
            shapes_xml
        );
        entries.push((format!("ppt/slides/slide{}.xml", i + 1), slide));
    }

    let borrowed: Vec<(&str, String)> = entries
        .iter()
        .map(|(name, xml)| (name.as_str(), xml.clone()))
        .collect();
    zip_entries(&borrowed)
}

/// Word document with one paragraph per entry (empty entries have no runs)
pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut doc = docx_rs::Docx::new();
    for text in paragraphs {
        let paragraph = if text.is_empty() {
            docx_rs::Paragraph::new()
        } else {
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text))
        };
        doc = doc.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    doc.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

/// Single-page PDF showing `text` in Courier
pub fn pdf(text: &str) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
