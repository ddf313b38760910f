use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::Response;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::ContentProvider;
use crate::ipc::IPC_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::{WebViewManager, PROTOCOL};

impl WebViewManager {
    /// Create the WebView as a child of `window`, positioned at `bounds`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let events = Arc::clone(&self.events);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_focused(true)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events));
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events));
        builder = Self::attach_title_handler(builder, Arc::clone(&events));
        builder = Self::attach_navigation_handler(builder, Arc::clone(&events));
        builder = self.attach_custom_protocol(builder);

        let initial_url = config.initial_url().to_string();
        builder = builder.with_url(&initial_url);

        let webview = builder.build_as_child(window)?;

        debug!(url = %initial_url, "WebView created");

        Ok(WebViewHandle {
            webview,
            current_url: initial_url,
        })
    }

    /// Set the content provider for serving bundled assets via `webbridge://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    fn attach_custom_protocol<'a>(&self, mut builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        if let Some(provider) = &self.content_provider {
            let cp = Arc::clone(provider);
            builder = builder.with_custom_protocol(PROTOCOL.to_string(), move |_wv_id, request| {
                let uri = request.uri().to_string();
                let path = protocol_path(&uri);

                let response = match cp.resolve(path) {
                    Some((mime, data)) => Response::builder()
                        .status(200)
                        .header("Content-Type", mime.as_ref())
                        .header("Access-Control-Allow-Origin", "webbridge://localhost")
                        .body(Cow::from(data.into_owned())),
                    None => {
                        warn!(path = %path, "custom protocol: asset not found");
                        Response::builder()
                            .status(404)
                            .body(Cow::from(b"Not Found".to_vec()))
                    }
                };
                response.unwrap_or_else(|e| {
                    warn!(error = %e, "custom protocol: failed to build response");
                    Response::new(Cow::from(Vec::new()))
                })
            });
        }
        builder
    }
}

/// Strip the scheme and host from a custom-protocol URI.
fn protocol_path(uri: &str) -> &str {
    uri.strip_prefix("webbridge://localhost/")
        .or_else(|| uri.strip_prefix("webbridge://localhost"))
        .or_else(|| uri.strip_prefix("http://webbridge.localhost/"))
        .or_else(|| uri.strip_prefix("webbridge:///"))
        .or_else(|| uri.strip_prefix("webbridge://"))
        .unwrap_or("")
}
