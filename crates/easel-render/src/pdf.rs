//! Single-page PDF export.

use crate::encode::rgba_bytes;
use crate::error::{RenderResult, RendererError};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tiny_skia::Pixmap;

/// Resource name of the page image.
const IMAGE_NAME: &str = "Im0";

/// Wrap a rendered surface as the only page of a PDF.
///
/// The page's MediaBox is `width x height` points and the raster is drawn
/// across all of it as an RGB image XObject.
pub fn encode_pdf(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let width = i64::from(pixmap.width());
    let height = i64::from(pixmap.height());

    let rgb: Vec<u8> = rgba_bytes(pixmap)
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb,
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![width.into(), 0.into(), 0.into(), height.into(), 0.into(), 0.into()],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_bytes = content
        .encode()
        .map_err(|e| RendererError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RendererError::Pdf(e.to_string()))?;
    Ok(bytes)
}
