use std::io::{Cursor, Write};

use lopdf::{dictionary, Document, Object, Stream};
use studykit_ingest::document::{MIME_DOCX, MIME_PDF};
use studykit_ingest::{extract_text, DocumentKind, ExtractionError};

fn pdf_with_font(font: lopdf::Dictionary, content: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let font_id = doc.add_object(font);
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn helvetica() -> lopdf::Dictionary {
    dictionary! { "Type" => "Font", "Subtype" => "Type1", "BaseFont" => "Helvetica" }
}

fn docx(body: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

#[test]
fn pdf_through_public_entry_point() {
    let pdf = pdf_with_font(
        helvetica(),
        "BT /F1 12 Tf 72 700 Td (Osmosis) Tj 0 -30 Td (Osmosis is the movement of water across a membrane.) Tj ET",
    );
    let out = extract_text(&pdf, MIME_PDF).unwrap();
    assert_eq!(out.kind(), DocumentKind::Pdf);
    assert_eq!(out.page_count(), 1);
    assert_eq!(
        out.as_str(),
        "Osmosis\n\nOsmosis is the movement of water across a membrane."
    );
}

#[test]
fn pdf_font_differences_are_honoured() {
    let font = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => dictionary! {
            "Type" => "Encoding",
            "BaseEncoding" => "WinAnsiEncoding",
            "Differences" => vec![
                65.into(),
                Object::Name(b"C".to_vec()),
                Object::Name(b"e".to_vec()),
                Object::Name(b"l".to_vec()),
                Object::Name(b"l".to_vec()),
            ],
        },
    };
    let pdf = pdf_with_font(
        font,
        "BT /F1 12 Tf 72 700 Td (ABCD membranes protect every living organism.) Tj ET",
    );
    let out = extract_text(&pdf, MIME_PDF).unwrap();
    assert!(out.as_str().starts_with("Cell membranes"), "{}", out.as_str());
}

#[test]
fn docx_through_public_entry_point() {
    let bytes = docx(
        "<w:p><w:r><w:t>Mitosis</w:t></w:r></w:p>\
         <w:p><w:r><w:t xml:space=\"preserve\">Mitosis is </w:t></w:r><w:r><w:t>a type of cell division.</w:t></w:r></w:p>",
    );
    let out = extract_text(&bytes, MIME_DOCX).unwrap();
    assert_eq!(out.kind(), DocumentKind::Docx);
    assert_eq!(out.as_str(), "Mitosis\n\nMitosis is a type of cell division.");
}

#[test]
fn legacy_word_mime_with_binary_body_fails() {
    let err = extract_text(b"\xD0\xCF\x11\xE0 legacy binary word file", "application/msword").unwrap_err();
    assert!(matches!(err, ExtractionError::Docx(_)));
}

#[test]
fn corrupt_pdf_is_reported() {
    let err = extract_text(b"%PDF-1.4 truncated garbage", MIME_PDF).unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::Pdf(_) | ExtractionError::InsufficientText { .. }
    ));
}
