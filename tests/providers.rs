// font-locate/tests/providers.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate font_locate;

use font_locate::error::TransportError;
use font_locate::providers::cache;
use font_locate::family::FontVariantsLocation;
use font_locate::providers::remote::{self, RemoteFontInfo, DEFAULT_API_URL};
use font_locate::providers::{RemoteConfig, RemoteProvider, SystemConfig, SystemProvider};
use font_locate::{
    CancelReason, CancelToken, Descriptor, MatchConfidence, ProviderChain, Registry, Resolver,
    SelectionError, Style, Weight,
};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};

static FONT_LIST: &'static str = "
/System/Library/Fonts/Supplemental/NotoSansGothic-Regular.ttf: Noto Sans Gothic:style=Regular
/System/Library/Fonts/NotoSerifMyanmar.ttc: Noto Serif Myanmar,Noto Serif Myanmar Light:style=Light,Regular
/System/Library/Fonts/Supplemental/NotoSansCarian-Regular.ttf: Noto Sans Carian:style=Regular
/System/Library/Fonts/NotoSansMyanmar.ttc: Noto Sans Zawgyi:style=Regular
/System/Library/Fonts/Supplemental/NotoSansSylotiNagri-Regular.ttf: Noto Sans Syloti Nagri:style=Regular
/System/Library/Fonts/NotoNastaliq.ttc: Noto Nastaliq Urdu:style=Bold
/System/Library/Fonts/Supplemental/NotoSansCham-Regular.ttf: Noto Sans Cham:style=Regular
/System/Library/Fonts/NotoSansArmenian.ttc: Noto Sans Armenian:style=Bold
";

static WEBFONTS_JSON: &'static str = r#"{
  "kind": "webfonts#webfontList",
  "items": [
    {
      "kind": "webfonts#webfont",
      "family": "Anonymous Pro",
      "variants": ["regular", "italic", "700", "700italic"],
      "subsets": ["cyrillic", "greek", "latin", "latin-ext"],
      "version": "v21",
      "lastModified": "2022-09-22",
      "files": {
        "regular": "http://fonts.gstatic.com/s/anonymouspro/v21/rP2Bp2a15UIB7Un-bOeISG3pLlw89CH98Ko.ttf",
        "italic": "http://fonts.gstatic.com/s/anonymouspro/v21/rP2fp2a15UIB7Un-bOeISG3pHl428AP44Kqr2Q.ttf",
        "700": "http://fonts.gstatic.com/s/anonymouspro/v21/rP2cp2a15UIB7Un-bOeISG3pFuAT0CnW7KOywKo.ttf",
        "700italic": "http://fonts.gstatic.com/s/anonymouspro/v21/rP2ap2a15UIB7Un-bOeISG3pHl4OTCzc6IG30KqB9Q.ttf"
      },
      "category": "monospace"
    },
    {
      "kind": "webfonts#webfont",
      "family": "Inconsolata",
      "variants": ["regular"],
      "subsets": ["latin", "latin-ext", "vietnamese"],
      "version": "v31",
      "files": {
        "regular": "http://fonts.gstatic.com/s/inconsolata/v31/QldgNThLqRwH-OJ1UHjlKENVzkWGVkL3GZQmAwLYxYWI2qfdm7Lpp4U8aRo.ttf"
      },
      "category": "monospace"
    },
    {
      "kind": "webfonts#webfont",
      "family": "Sedan SC",
      "variants": ["100italic"],
      "files": {
        "100italic": "http://fonts.gstatic.com/s/sedansc/v1/sedan.ttf"
      }
    }
  ]
}"#;

static FONT_BYTES: &'static [u8] = b"dummy-font-bytes";

// A fresh directory below the system temp directory.
fn scratch_dir(name: &str) -> PathBuf {
    let directory = env::temp_dir().join(format!("font-locate-{}-{}", name, process::id()));
    let _ = fs::remove_dir_all(&directory);
    fs::create_dir_all(&directory).unwrap();
    directory
}

fn packaged(file_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("packaged")
        .join(file_name)
}

fn resolver(chain: ProviderChain) -> Resolver {
    Resolver::with_registry(Arc::new(Registry::new()), chain)
}

// System fonts

fn system_with_font_list(name: &str) -> SystemProvider {
    let config_dir = scratch_dir(name);
    let list_dir = config_dir.join("font-locate-test").join("fontconfig");
    fs::create_dir_all(&list_dir).unwrap();
    fs::write(list_dir.join("fontlist.txt"), FONT_LIST).unwrap();
    SystemProvider::new(
        SystemConfig::new("font-locate-test")
            .config_dir(config_dir)
            .font_directories(vec![]),
    )
}

#[test]
pub fn font_list_path_layout() {
    let config = SystemConfig::new("my-app").config_dir("/home/someone/.config");
    assert_eq!(
        config.font_list_path(),
        Some(PathBuf::from(
            "/home/someone/.config/my-app/fontconfig/fontlist.txt"
        ))
    );
    assert_eq!(SystemConfig::new("").font_list_path(), None);
}

#[test]
pub fn system_font_from_font_list() {
    let system = system_with_font_list("fclist");
    assert_eq!(system.font_list().map(|list| list.len()), Some(8));
    let resolution = resolver(ProviderChain::new().with(system))
        .start(Descriptor::new("Noto Sans Cham"))
        .wait();
    assert_eq!(resolution.error, None);
    assert_eq!(resolution.font.path(), "NotoSansCham-Regular.ttf");
    assert_eq!(resolution.font.name, "Noto Sans Cham");
}

#[test]
pub fn font_list_is_authoritative() {
    let system = system_with_font_list("fclist-miss");
    let cancel = CancelToken::never();
    assert_eq!(
        font_locate::Provider::locate(&system, &cancel, &Descriptor::new("DejaVu")),
        Err(SelectionError::NotFound)
    );
    assert!(system.installed_fonts().is_empty());
}

#[test]
pub fn system_font_from_directory_scan() {
    let fonts = scratch_dir("scan-fonts");
    let nested = fonts.join("truetype").join("dejavu");
    fs::create_dir_all(&nested).unwrap();
    for file_name in &["DejaVuSansMono.ttf", "DejaVuSansMono-Bold.ttf"] {
        fs::copy(packaged(file_name), nested.join(file_name)).unwrap();
    }
    fs::write(fonts.join("DejaVuCollection.ttc"), b"ttcf").unwrap();
    fs::write(fonts.join("notes.txt"), b"not a font").unwrap();

    let system = SystemProvider::new(
        SystemConfig::new("font-locate-test")
            .config_dir(scratch_dir("scan-config"))
            .font_directories(vec![fonts]),
    );
    assert!(system.font_list().is_none());
    assert_eq!(system.installed_fonts().len(), 2);

    let bold = system
        .find(&Descriptor::new("DejaVu").weight(Weight::BOLD))
        .unwrap();
    assert_eq!(bold.path(), "DejaVuSansMono-Bold.ttf");
    assert_eq!(
        bold.read_bytes().unwrap(),
        fs::read(packaged("DejaVuSansMono-Bold.ttf")).unwrap()
    );
    assert_eq!(
        system.find(&Descriptor::new("Garamond")),
        Err(SelectionError::NotFound)
    );
}

#[test]
pub fn system_provider_checks_cancellation() {
    let system = system_with_font_list("fclist-cancel");
    let cancel = CancelToken::new();
    cancel.cancel();
    assert_eq!(
        font_locate::Provider::locate(&system, &cancel, &Descriptor::new("Noto Sans Cham")),
        Err(SelectionError::Cancelled(CancelReason::Cancelled))
    );
}

// Remote fonts

#[derive(Clone, Default)]
struct FakeTransport {
    requests: Arc<Mutex<Vec<String>>>,
    fail_downloads: bool,
}

impl FakeTransport {
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl remote::Transport for FakeTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().unwrap().push(url.to_owned());
        if url.starts_with(DEFAULT_API_URL) {
            Ok(WEBFONTS_JSON.as_bytes().to_vec())
        } else if self.fail_downloads {
            Err(TransportError::Status(404))
        } else {
            Ok(FONT_BYTES.to_vec())
        }
    }
}

fn remote_config(name: &str) -> RemoteConfig {
    RemoteConfig::new("font-locate-test")
        .api_key("test-key")
        .cache_dir(scratch_dir(name))
}

#[test]
pub fn remote_directory_is_fetched_once() {
    let transport = FakeTransport::default();
    let provider = RemoteProvider::new(remote_config("remote-once"), transport.clone());
    assert_eq!(provider.directory().unwrap().len(), 3);
    assert_eq!(provider.directory().unwrap().len(), 3);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("key=test-key"));
    assert!(requests[0].contains("sort=alpha"));

    let anonymous = &provider.directory().unwrap()[0];
    assert_eq!(anonymous.location.family, "Anonymous Pro");
    assert_eq!(anonymous.location.variants.len(), 4);
    assert_eq!(anonymous.version, "v21");
    assert_eq!(anonymous.files.len(), 4);
}

#[test]
pub fn remote_font_is_cached() {
    let transport = FakeTransport::default();
    let config = remote_config("remote-cache");
    let cache_dir = config.cache_dir.clone().unwrap();
    let provider = RemoteProvider::new(config, transport.clone());
    let cancel = CancelToken::never();

    let font = provider
        .find(&cancel, &Descriptor::new("Inconsolata"))
        .unwrap();
    assert_eq!(font.path(), "Inconsolata-regular.ttf");
    assert_eq!(font.read_bytes().unwrap(), FONT_BYTES.to_vec());
    assert!(cache_dir.join("I").join("Inconsolata-regular.ttf").is_file());
    assert_eq!(transport.requests().len(), 2);

    let again = provider
        .find(&cancel, &Descriptor::new("inconsolata"))
        .unwrap();
    assert_eq!(again, font);
    assert_eq!(transport.requests().len(), 2);
}

#[test]
pub fn remote_variant_selection() {
    let provider = RemoteProvider::new(remote_config("remote-variants"), FakeTransport::default());
    let cancel = CancelToken::never();
    let regular = provider
        .find(&cancel, &Descriptor::new("Anonymous Pro"))
        .unwrap();
    assert_eq!(regular.path(), "Anonymous Pro-regular.ttf");
    let italic = provider
        .find(&cancel, &Descriptor::new("Anonymous Pro").style(Style::Italic))
        .unwrap();
    assert_eq!(italic.path(), "Anonymous Pro-italic.ttf");
    let bold_italic = provider
        .find(
            &cancel,
            &Descriptor::new("anonymous")
                .style(Style::Italic)
                .weight(Weight::BOLD),
        )
        .unwrap();
    assert_eq!(bold_italic.path(), "Anonymous Pro-700italic.ttf");
}

#[test]
pub fn remote_errors() {
    let provider = RemoteProvider::new(remote_config("remote-errors"), FakeTransport::default());
    let cancel = CancelToken::never();
    assert_eq!(
        provider
            .find(&cancel, &Descriptor::new("Comic Neue"))
            .map(|font| font.name),
        Err(SelectionError::NotFound)
    );
    assert_eq!(
        provider
            .find(&cancel, &Descriptor::new("Sedan").weight(Weight::BLACK))
            .map(|font| font.name),
        Err(SelectionError::NoMatch {
            family: "Sedan SC".to_owned(),
            confidence: MatchConfidence::None,
        })
    );
    match provider.find(&cancel, &Descriptor::new("[")) {
        Err(SelectionError::InvalidPattern(_)) => {}
        other => panic!("expected invalid pattern, got {:?}", other),
    }
}

#[test]
pub fn remote_without_api_key() {
    let transport = FakeTransport::default();
    let config = RemoteConfig::new("font-locate-test").cache_dir(scratch_dir("remote-nokey"));
    let provider = RemoteProvider::new(config, transport.clone());
    for _ in 0..2 {
        match provider.find(&CancelToken::never(), &Descriptor::new("Inconsolata")) {
            Err(SelectionError::CannotAccessSource(_)) => {}
            other => panic!("expected inaccessible source, got {:?}", other),
        }
    }
    assert!(transport.requests().is_empty());
}

#[test]
pub fn remote_download_is_skipped_when_cancelled() {
    let transport = FakeTransport::default();
    let provider = RemoteProvider::new(remote_config("remote-cancel"), transport.clone());
    let cancel = CancelToken::new();
    cancel.cancel();
    assert_eq!(
        provider
            .find(&cancel, &Descriptor::new("Inconsolata"))
            .map(|font| font.name),
        Err(SelectionError::Cancelled(CancelReason::Cancelled))
    );
    assert_eq!(transport.requests().len(), 1);
}

#[test]
pub fn remote_failed_download_leaves_no_file() {
    let transport = FakeTransport {
        fail_downloads: true,
        ..FakeTransport::default()
    };
    let config = remote_config("remote-404");
    let cache_dir = config.cache_dir.clone().unwrap();
    let provider = RemoteProvider::new(config, transport);
    match provider.find(&CancelToken::never(), &Descriptor::new("Inconsolata")) {
        Err(SelectionError::CannotAccessSource(_)) => {}
        other => panic!("expected inaccessible source, got {:?}", other),
    }
    assert_eq!(fs::read_dir(cache_dir.join("I")).unwrap().count(), 0);
}

#[test]
pub fn remote_falls_back_in_chain() {
    let provider = RemoteProvider::new(remote_config("remote-chain"), FakeTransport::default());
    let resolution = resolver(ProviderChain::new().with(provider))
        .start(Descriptor::new("Comic Neue"))
        .wait();
    assert!(resolution.is_degraded());
    assert!(!resolution.font.is_null());
}

#[test]
pub fn cache_folder_layout() {
    let config = remote_config("cache-layout");
    let base = config.cache_dir.clone().unwrap();
    let folder = cache::cache_font_dir(&config, "Q").unwrap();
    assert_eq!(folder, base.join("Q"));
    assert!(folder.is_dir());

    let unnamed = RemoteConfig::new("");
    match cache::cache_font_dir(&unnamed, "Q") {
        Err(SelectionError::CannotAccessSource(_)) => {}
        other => panic!("expected inaccessible source, got {:?}", other),
    }
}

#[test]
pub fn cached_names_stay_inside_the_cache() {
    let config = remote_config("cache-escape");
    let base = config.cache_dir.clone().unwrap();
    let mut files = HashMap::new();
    files.insert(
        "../regular".to_owned(),
        "http://fonts.example.com/x/evil.t/f".to_owned(),
    );
    files.insert("bold".to_owned(), "http://fonts.example.com/x/ok.ttf".to_owned());
    let info = RemoteFontInfo {
        location: FontVariantsLocation::new("../../Escape/Sans", "")
            .variant("../regular")
            .variant("bold"),
        files,
        ..RemoteFontInfo::default()
    };
    let transport = FakeTransport::default();

    let (directory, name) =
        cache::cache_remote_font(&config, &transport, &info, "../regular").unwrap();
    assert_eq!(directory, base.join("_"));
    assert_eq!(name, "______Escape_Sans-___regular");
    assert!(directory.join(&name).is_file());

    let (_, name) = cache::cache_remote_font(&config, &transport, &info, "bold").unwrap();
    assert_eq!(name, "______Escape_Sans-bold.ttf");
    assert_eq!(cache::path_safe("a/b\\c:d..e"), "a_b_c_d__e");
}

#[test]
pub fn remote_config_builders() {
    let config = RemoteConfig::new("app")
        .api_key("k")
        .api_url("http://localhost:8080/webfonts?");
    assert_eq!(config.app_key, "app");
    assert_eq!(config.api_key, Some("k".to_owned()));
    assert_eq!(config.api_url, "http://localhost:8080/webfonts?");
    assert_eq!(RemoteConfig::new("app").api_url, DEFAULT_API_URL);
}

// Serves one canned HTTP response on a local port and returns its base URL.
#[cfg(feature = "http")]
fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0; 4096];
        let _ = stream.read(&mut request);
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line,
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(body).unwrap();
    });
    format!("http://{}", address)
}

#[cfg(feature = "http")]
#[test]
pub fn http_transport_fetches_body() {
    use font_locate::providers::HttpTransport;
    use font_locate::providers::Transport;

    let url = serve_once("200 OK", FONT_BYTES);
    let body = HttpTransport::new().get(&format!("{}/font.ttf", url)).unwrap();
    assert_eq!(body, FONT_BYTES);
}

#[cfg(feature = "http")]
#[test]
pub fn http_transport_reports_status() {
    use font_locate::providers::HttpTransport;
    use font_locate::providers::Transport;

    let url = serve_once("404 Not Found", b"");
    match HttpTransport::new().get(&format!("{}/missing.ttf", url)) {
        Err(TransportError::Status(404)) => {}
        other => panic!("expected status 404, got {:?}", other),
    }
}

#[cfg(feature = "http")]
#[test]
pub fn remote_provider_over_http() {
    let url = serve_once("200 OK", WEBFONTS_JSON.as_bytes());
    let config = remote_config("remote-http").api_url(format!("{}/webfonts?", url));
    let provider = RemoteProvider::over_http(config);
    assert_eq!(provider.directory().unwrap().len(), 3);
}
