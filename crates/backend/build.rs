use std::env;
use std::fs;
use std::path::Path;

/// Кладёт config.toml из корня workspace рядом с собранным бинарником,
/// чтобы `shared::config::load_config` нашёл его при запуске.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let Ok(profile) = env::var("PROFILE") else {
        return;
    };

    // OUT_DIR: target/<profile>/build/backend-xxx/out
    let Some(bin_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=Cannot locate target/{} directory", profile);
        return;
    };

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let Some(workspace_root) = manifest_dir.parent().and_then(|p| p.parent()) else {
        return;
    };

    let source = workspace_root.join("config.toml");
    if !source.exists() {
        println!("cargo:warning=No config.toml in workspace root, embedded defaults will be used");
        return;
    }

    let dest = bin_dir.join("config.toml");
    if let Err(e) = fs::copy(&source, &dest) {
        panic!("Failed to copy {:?} to {:?}: {}", source, dest, e);
    }
}
