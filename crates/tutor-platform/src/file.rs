//! Browser file picker and `FileSource` over `web_sys::File`.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

use tutor_core::ports::FileSource;
use tutor_types::{Result, TutorError, document::FileMeta};

const PDF_ACCEPT: &str = ".pdf,application/pdf";

fn js_err(e: JsValue) -> TutorError {
    TutorError::JsInterop(format!("{:?}", e))
}

/// A file chosen in the browser. Bytes are read on demand.
pub struct BrowserFile {
    file: File,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self { file }
    }
}

#[async_trait(?Send)]
impl FileSource for BrowserFile {
    fn meta(&self) -> FileMeta {
        FileMeta::new(self.file.name(), self.file.type_(), self.file.size() as u64)
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        let buffer = JsFuture::from(self.file.array_buffer())
            .await
            .map_err(|e| TutorError::Document {
                name: self.file.name(),
                message: format!("{:?}", e),
            })?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

/// Open the browser's file dialog and wait for a choice.
///
/// Resolves to `None` when the dialog is dismissed. The `accept` filter is
/// only a hint; the controller still checks the MIME type.
pub async fn pick_pdf_file() -> Result<Option<BrowserFile>> {
    let input: HtmlInputElement = gloo_utils::document()
        .create_element("input")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| TutorError::JsInterop("created element is not an <input>".to_string()))?;
    input.set_type("file");
    input.set_accept(PDF_ACCEPT);

    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let settle = move |tx: &Rc<RefCell<Option<oneshot::Sender<bool>>>>, chosen: bool| {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(chosen);
        }
    };

    let on_change = {
        let tx = tx.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| settle(&tx, true))
    };
    let on_cancel = {
        let tx = tx.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| settle(&tx, false))
    };
    input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
    input
        .add_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref())
        .map_err(js_err)?;
    input.click();

    // Both closures must outlive the dialog
    let chosen = rx.await.unwrap_or(false);
    input.set_onchange(None);
    drop(on_change);
    drop(on_cancel);

    if !chosen {
        log::info!("File dialog dismissed");
        return Ok(None);
    }
    Ok(input.files().and_then(|files| files.get(0)).map(BrowserFile::new))
}
