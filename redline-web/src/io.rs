//! Browser-based file I/O using Web APIs

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, File, FileReader, HtmlAnchorElement, HtmlInputElement, Url};

use redline_core::{App, ExportArtifact, XLSX_MIME};

/// Trigger a browser download of an exported workbook.
pub fn download_workbook(artifact: &ExportArtifact) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    // Create a blob from the workbook bytes
    let bytes = js_sys::Uint8Array::from(artifact.bytes.as_slice());
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&bytes.buffer());

    let blob_options = web_sys::BlobPropertyBag::new();
    blob_options.set_type(XLSX_MIME);

    let blob = Blob::new_with_buffer_source_sequence_and_options(&blob_parts, &blob_options)?;

    // Create an object URL for the blob
    let url = Url::create_object_url_with_blob(&blob)?;

    // Create a temporary anchor element and trigger download
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;

    anchor.set_href(&url);
    anchor.set_download(&artifact.file_name);
    anchor.click();

    // Clean up the object URL
    Url::revoke_object_url(&url)?;

    Ok(())
}

/// Wire the page's `#workbook-upload` file input to the session, so
/// chosen `.xlsx` files are read and registered as uploads.
pub fn attach_file_input(app_state: Rc<RefCell<App>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let input: HtmlInputElement = document
        .get_element_by_id("workbook-upload")
        .ok_or("No #workbook-upload input")?
        .dyn_into()?;

    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let input: Option<HtmlInputElement> =
            event.target().and_then(|t| t.dyn_into().ok());
        let files = match input.and_then(|i| i.files()) {
            Some(f) => f,
            None => return,
        };

        for i in 0..files.length() {
            if let Some(file) = files.get(i) {
                read_workbook_file(app_state.clone(), file);
            }
        }
    });

    input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
    on_change.forget();

    Ok(())
}

/// Read one chosen file asynchronously and add it to the session.
fn read_workbook_file(app_state: Rc<RefCell<App>>, file: File) {
    let reader = match FileReader::new() {
        Ok(r) => r,
        Err(_) => return,
    };

    let name = file.name();
    let reader_handle = reader.clone();

    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::new(
        move |_event: web_sys::ProgressEvent| {
            let buffer = match reader_handle.result() {
                Ok(b) => b,
                Err(_) => return,
            };
            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

            let mut app = app_state.borrow_mut();
            match app.add_file(name.clone(), bytes) {
                Ok(()) => app.set_status(&format!("Loaded {}", name)),
                Err(e) => app.set_status(&format!("Error: {}", e)),
            }
        },
    );

    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    let _ = reader.read_as_array_buffer(&file);
    on_load.forget();
}
