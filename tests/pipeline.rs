//! End-to-end runs of the pipeline with the standard backend.
//!
//! Every test writes a real source image into a temp directory and checks
//! what lands on disk, so these exercise decoding, resampling and encoding
//! as well as orchestration.

use faviconize::hooks::HookResult;
use faviconize::{
    FaviconPlugin, GenerationRequest, HookSet, PipelineError, config, generate, generate_favicons,
};
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const EXPECTED_FILES: [&str; 7] = [
    "apple-touch-icon.png",
    "favicon-96x96.png",
    "favicon.ico",
    "favicon.svg",
    "site.webmanifest",
    "web-app-manifest-192x192.png",
    "web-app-manifest-512x512.png",
];

fn write_logo(path: &Path) {
    let img = RgbaImage::from_fn(80, 60, |x, y| {
        if (x / 10 + y / 10) % 2 == 0 {
            Rgba([200, 40, 40, 255])
        } else {
            Rgba([40, 40, 200, 255])
        }
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Counts hook calls by name.
#[derive(Clone, Default)]
struct Counter(Arc<Mutex<Vec<&'static str>>>);

impl Counter {
    fn hooks(&self) -> HookSet {
        let log = |name| record(Arc::clone(&self.0), name);
        let start = Arc::clone(&self.0);
        HookSet::new()
            .on_start(move || {
                start.lock().unwrap().push("on_start");
                Ok(())
            })
            .on_skip_files(log("on_skip_files"))
            .on_file_written(log("on_file_written"))
            .on_html_written(log("on_html_written"))
            .on_ico_copied(log("on_ico_copied"))
    }

    fn count(&self, name: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|n| **n == name).count()
    }

    fn total(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

fn record(
    events: Arc<Mutex<Vec<&'static str>>>,
    name: &'static str,
) -> impl Fn(&Path) -> HookResult + Send + Sync + 'static {
    move |_| {
        events.lock().unwrap().push(name);
        Ok(())
    }
}

fn request(tmp: &TempDir, counter: &Counter) -> GenerationRequest {
    let source = tmp.path().join("logo.png");
    write_logo(&source);
    GenerationRequest::new(source, tmp.path().join("out"))
        .html_output(tmp.path().join("head.html"))
        .hooks(counter.hooks())
}

#[test]
fn fresh_run_writes_full_set_and_markup() {
    let tmp = TempDir::new().unwrap();
    let counter = Counter::default();
    generate_favicons(&request(&tmp, &counter)).unwrap();

    let out = tmp.path().join("out");
    assert_eq!(listing(&out), EXPECTED_FILES);

    let touch = image::open(out.join("apple-touch-icon.png")).unwrap();
    assert_eq!((touch.width(), touch.height()), (180, 180));
    let large = image::open(out.join("web-app-manifest-512x512.png")).unwrap();
    assert_eq!((large.width(), large.height()), (512, 512));
    let ico = fs::read(out.join("favicon.ico")).unwrap();
    assert_eq!(&ico[..4], &[0, 0, 1, 0]);

    let manifest: serde_json::Value =
        serde_json::from_slice(&fs::read(out.join("site.webmanifest")).unwrap()).unwrap();
    assert_eq!(manifest["icons"].as_array().unwrap().len(), 2);

    let html = fs::read_to_string(tmp.path().join("head.html")).unwrap();
    assert!(html.contains(r#"href="/favicon.ico""#));
    assert!(html.contains(r#"rel="manifest""#));

    assert_eq!(counter.count("on_start"), 1);
    assert_eq!(counter.count("on_file_written"), 7);
    assert_eq!(counter.count("on_html_written"), 1);
    assert_eq!(counter.count("on_skip_files"), 0);
}

#[test]
fn existing_output_dir_skips_files_but_writes_markup() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("out")).unwrap();
    let counter = Counter::default();

    generate_favicons(&request(&tmp, &counter)).unwrap();

    assert!(listing(&tmp.path().join("out")).is_empty());
    assert!(tmp.path().join("head.html").exists());
    assert_eq!(counter.count("on_skip_files"), 1);
    assert_eq!(counter.count("on_file_written"), 0);
    assert_eq!(counter.count("on_html_written"), 1);
}

#[test]
fn second_run_keeps_files_and_rewrites_markup() {
    let tmp = TempDir::new().unwrap();
    let counter = Counter::default();
    let request = request(&tmp, &counter);

    generate_favicons(&request).unwrap();
    let ico = fs::read(tmp.path().join("out/favicon.ico")).unwrap();
    fs::write(tmp.path().join("head.html"), "stale").unwrap();

    generate_favicons(&request).unwrap();
    assert_eq!(fs::read(tmp.path().join("out/favicon.ico")).unwrap(), ico);
    assert_ne!(
        fs::read_to_string(tmp.path().join("head.html")).unwrap(),
        "stale"
    );
    assert_eq!(counter.count("on_file_written"), 7);
    assert_eq!(counter.count("on_skip_files"), 1);
    assert_eq!(counter.count("on_html_written"), 2);
}

#[test]
fn regeneration_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    let counter = Counter::default();
    let request = request(&tmp, &counter).skip_if_exists(false);

    generate_favicons(&request).unwrap();
    let first: Vec<Vec<u8>> = EXPECTED_FILES
        .iter()
        .map(|f| fs::read(tmp.path().join("out").join(f)).unwrap())
        .collect();

    generate_favicons(&request).unwrap();
    for (name, before) in EXPECTED_FILES.iter().zip(first) {
        assert_eq!(
            fs::read(tmp.path().join("out").join(name)).unwrap(),
            before,
            "{name}"
        );
    }
    assert_eq!(counter.count("on_file_written"), 14);
}

#[test]
fn ico_root_copy() {
    let tmp = TempDir::new().unwrap();
    let counter = Counter::default();
    let root = tmp.path().join("public");
    generate_favicons(&request(&tmp, &counter).copy_ico_to(&root)).unwrap();

    assert_eq!(
        fs::read(root.join("favicon.ico")).unwrap(),
        fs::read(tmp.path().join("out/favicon.ico")).unwrap()
    );
    assert_eq!(counter.count("on_ico_copied"), 1);
}

#[test]
fn copy_without_root_dir_fails_before_hooks() {
    let tmp = TempDir::new().unwrap();
    let counter = Counter::default();
    let mut request = request(&tmp, &counter);
    request.copy_ico_to_root = true;

    let err = generate_favicons(&request).unwrap_err();
    assert!(matches!(err, PipelineError::MissingRootDir));
    assert_eq!(counter.total(), 0);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn missing_source_option_fires_nothing() {
    let tmp = TempDir::new().unwrap();
    let counter = Counter::default();
    let request = GenerationRequest::new("", tmp.path().join("out")).hooks(counter.hooks());

    let err = generate_favicons(&request).unwrap_err();
    assert!(matches!(err, PipelineError::MissingOption("source")));
    assert_eq!(counter.total(), 0);
}

#[test]
fn unreadable_source_is_normalize_error() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("logo.png");
    fs::write(&source, "not an image").unwrap();
    let request = GenerationRequest::new(&source, tmp.path().join("out"));

    let err = generate_favicons(&request).unwrap_err();
    match err {
        PipelineError::Normalize { path, .. } => assert_eq!(path, source),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn svg_source_keeps_vector() {
    let tmp = TempDir::new().unwrap();
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 32 32"><circle cx="16" cy="16" r="16" fill="#228833"/></svg>"##;
    let source = tmp.path().join("logo.svg");
    fs::write(&source, svg).unwrap();

    generate_favicons(&GenerationRequest::new(&source, tmp.path().join("out"))).unwrap();

    assert_eq!(listing(&tmp.path().join("out")), EXPECTED_FILES);
    assert_eq!(
        fs::read_to_string(tmp.path().join("out/favicon.svg")).unwrap(),
        svg
    );
}

#[test]
fn config_file_through_direct_adapter() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("assets")).unwrap();
    write_logo(&tmp.path().join("assets/logo.png"));

    let request = config::parse_request(
        r#"
        source = "assets/logo.png"
        output_dir = "./public/icons"
        html_output = "partials/favicons.html"
        copy_ico_to_root = true
        root_dir = "public"
        path = "/icons/"

        [icon.touch]
        app_title = "Gallery"
        "#,
    )
    .unwrap();

    generate(request, tmp.path()).unwrap();

    assert_eq!(listing(&tmp.path().join("public/icons")), EXPECTED_FILES);
    assert!(tmp.path().join("public/favicon.ico").exists());
    let html = fs::read_to_string(tmp.path().join("partials/favicons.html")).unwrap();
    assert!(html.contains(r#"href="/icons/favicon.svg""#));
    assert!(html.contains(r#"<meta name="apple-mobile-web-app-title" content="Gallery">"#));
}

#[test]
fn plugin_matches_direct_adapter() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    for tmp in [&a, &b] {
        write_logo(&tmp.path().join("logo.png"));
    }
    let request = || GenerationRequest::new("logo.png", "icons").html_output("head.html");

    generate(request(), a.path()).unwrap();
    FaviconPlugin::new(request()).build_start(b.path()).unwrap();

    let files: Vec<PathBuf> = EXPECTED_FILES
        .iter()
        .map(|f| Path::new("icons").join(f))
        .chain([PathBuf::from("head.html")])
        .collect();
    for file in files {
        assert_eq!(
            fs::read(a.path().join(&file)).unwrap(),
            fs::read(b.path().join(&file)).unwrap(),
            "{}",
            file.display()
        );
    }
}
