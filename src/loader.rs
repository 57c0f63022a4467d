//! Fetch the showcase glTF and its external buffers.

use anyhow::anyhow;
use folio_core::{external_buffer_uris, load_buffers, resolve_uri, ModelMesh, OnReady};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("fetch {url}: {:?}", e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow!("fetch {url}: not a Response: {:?}", e))?;
    if !resp.ok() {
        return Err(anyhow!("fetch {url}: HTTP {}", resp.status()));
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow!("fetch {url}: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow!("fetch {url}: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_model(url: &str) -> anyhow::Result<ModelMesh> {
    log::info!("[asset] loading {url}");
    let bytes = fetch_bytes(url).await?;
    let gltf = gltf::Gltf::from_slice(&bytes)?;
    let mut fetched = FnvHashMap::default();
    for uri in external_buffer_uris(&gltf)? {
        let data = fetch_bytes(&resolve_uri(url, &uri)).await?;
        fetched.insert(uri, data);
    }
    let buffers = load_buffers(&gltf, |uri| fetched.remove(uri))?;
    Ok(ModelMesh::from_gltf(&gltf, &buffers)?)
}

/// Load in the background and settle `slot` either way.
pub fn spawn_model_load(url: String, slot: Rc<RefCell<OnReady<ModelMesh>>>) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = load_model(&url).await;
        let mut slot = slot.borrow_mut();
        let settled = match outcome {
            Ok(mesh) => slot.resolve(mesh),
            Err(e) => slot.fail(format!("{url}: {e:#}")),
        };
        if let Err(e) = settled {
            log::warn!("[asset] {e}");
        }
    });
}
