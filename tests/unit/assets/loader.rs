use super::*;

struct RejectUrls;

impl MediaLoader for RejectUrls {
    fn probe(&self, source: &AssetSource, _usage: AssetUsage) -> Result<(), String> {
        match source {
            AssetSource::Url(_) => Err("offline".to_string()),
            AssetSource::Local(_) => Ok(()),
        }
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("reelwright_loader_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("vol/clips")).unwrap();
    dir
}

#[test]
fn fs_loader_checks_local_files_only() {
    let root = scratch_dir("fs");
    std::fs::write(root.join("vol/clips/a.mp4"), b"x").unwrap();
    let loader = FsMediaLoader::new(&root);

    let present = AssetSource::Local("vol/clips/a.mp4".to_string());
    let missing = AssetSource::Local("vol/clips/b.mp4".to_string());
    let dir = AssetSource::Local("vol/clips".to_string());
    let url = AssetSource::Url("https://example.invalid/a.mp4".to_string());

    assert!(loader.probe(&present, AssetUsage::Video).is_ok());
    assert!(loader.probe(&missing, AssetUsage::Video).is_err());
    assert!(loader.probe(&dir, AssetUsage::Video).is_err());
    assert!(loader.probe(&url, AssetUsage::Video).is_ok());

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn preflight_reports_each_failed_source_once() {
    let url = AssetSource::Url("https://cdn/a.png".to_string());
    let local = AssetSource::Local("vol/b.png".to_string());
    let sources = vec![
        (&url, AssetUsage::Image),
        (&local, AssetUsage::Image),
        (&url, AssetUsage::Meme),
    ];

    let mut reported = Vec::new();
    let failures = preflight(sources, &RejectUrls, &mut |f| reported.push(f.clone()));

    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].source, url);
    assert_eq!(reported[0].usage, AssetUsage::Image);
    assert_eq!(reported[0].reason, "offline");
    assert!(failures.is_failed(&url));
    assert!(!failures.is_failed(&local));
    assert_eq!(failures.len(), 1);
}
