use std::fs;
use std::path::Path;

use monaco_prompt::config::Config;

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Config whose plugin root and asset directories live under `root`.
///
/// Layout: `root/plugins` (scanned for snippets) and
/// `root/plugins/webui-monaco-prompt` (extension root).
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.paths.plugin_root = Some(root.join("plugins"));
    config
}

pub fn extension_root(root: &Path) -> std::path::PathBuf {
    root.join("plugins").join("webui-monaco-prompt")
}
