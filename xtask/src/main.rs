//! XTask - build and release automation for miqat
//!
//! # Usage
//! ```sh
//! cargo xtask dist-web              # WASM package for the browser and NPM
//! cargo xtask dev-web               # WASM + a local prayer-times test page
//! cargo xtask sync-versions         # workspace version -> package.json
//! cargo xtask publish-crates -n     # dry-run crates.io release
//! ```

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

/// Publish order: every crate comes after the crates it depends on.
const PUBLISH_ORDER: &[(&str, &str)] = &[
    ("miqat-types", "crates/miqat-types"),
    ("miqat-calendar", "crates/miqat-calendar"),
    ("miqat-astronomy", "crates/miqat-astronomy"),
    ("miqat-schedule", "crates/miqat-schedule"),
    ("miqat-network", "crates/miqat-network"),
    ("miqat-core", "crates/miqat_core"),
    ("miqat", "crates/miqat"),
];

const NPM_NAME: &str = "@miqat/miqat";
const WASM_OUT_NAME: &str = "miqat";

#[derive(Debug, Clone, Copy)]
enum Task {
    DistWeb,
    DevWeb,
    SyncVersions,
    BuildAll,
    PublishCrates,
    PublishNpm,
    PublishAll,
}

impl Task {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "dist-web" => Task::DistWeb,
            "dev-web" => Task::DevWeb,
            "sync-versions" => Task::SyncVersions,
            "build-all" => Task::BuildAll,
            "publish-crates" => Task::PublishCrates,
            "publish-npm" => Task::PublishNpm,
            "publish-all" => Task::PublishAll,
            _ => return None,
        })
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    if matches!(command.as_str(), "-h" | "--help" | "help") {
        print_usage();
        return Ok(());
    }

    let dry_run = args.iter().any(|a| a == "--dry-run" || a == "-n");
    let task = match Task::parse(command) {
        Some(task) => task,
        None => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    };

    let ws = Workspace::locate()?;
    match task {
        Task::DistWeb => ws.dist_web(),
        Task::DevWeb => ws.dev_web(),
        Task::SyncVersions => ws.sync_versions(),
        Task::BuildAll => ws.build_all(),
        Task::PublishCrates => ws.publish_crates(dry_run),
        Task::PublishNpm => ws.publish_npm(dry_run),
        Task::PublishAll => {
            ws.publish_crates(dry_run)?;
            ws.publish_npm(dry_run)
        }
    }
}

fn print_usage() {
    println!(
        r#"
🕌 miqat xtask

USAGE:
    cargo xtask <COMMAND> [--dry-run | -n]

BUILD:
    dist-web        wasm-pack build (web -> dist/web, nodejs -> pkg)
    dev-web         dist-web plus a test page in dist/dev
    sync-versions   Copy the workspace version into pkg/package.json
    build-all       sync-versions, release build, dist-web

PUBLISH:
    publish-crates  crates.io, in dependency order
    publish-npm     NPM from pkg/
    publish-all     Both of the above
"#
    );
}

struct Workspace {
    root: PathBuf,
}

impl Workspace {
    fn locate() -> Result<Self> {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("xtask must live one level below the workspace root")?
            .to_path_buf();
        Ok(Self { root })
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    fn version(&self) -> Result<String> {
        let manifest = self.path("Cargo.toml");
        let content =
            fs::read_to_string(&manifest).with_context(|| format!("Failed to read {}", manifest.display()))?;
        workspace_version(&content).context("No version under [workspace.package] in Cargo.toml")
    }

    fn sync_versions(&self) -> Result<()> {
        let version = self.version()?;
        println!("🔄 Syncing version {}...", version);
        for rel in ["pkg/package.json", "dist/web/package.json"] {
            let path = self.path(rel);
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            fs::write(&path, set_json_version(&content, &version))?;
            println!("  ✅ {}", rel);
        }
        Ok(())
    }

    fn wasm_pack(&self, target: &str, out_dir: &Path) -> Result<()> {
        run_in(
            &self.path("bindings/miqat_wasm"),
            "wasm-pack",
            &[
                "build",
                "--release",
                "--target",
                target,
                "--out-dir",
                out_dir.to_string_lossy().as_ref(),
                "--out-name",
                WASM_OUT_NAME,
            ],
        )
    }

    fn dist_web(&self) -> Result<()> {
        println!("\n🕸️  Building WASM package...\n");
        if !command_exists("wasm-pack") {
            println!("  ⚠️ wasm-pack not found, installing");
            run_in(&self.root, "cargo", &["install", "wasm-pack"])?;
        }

        let web = self.path("dist/web");
        let pkg = self.path("pkg");
        self.wasm_pack("web", &web)?;
        self.wasm_pack("nodejs", &pkg)?;

        let package_json = pkg.join("package.json");
        if package_json.exists() {
            let content = fs::read_to_string(&package_json)?;
            fs::write(&package_json, content.replace("\"name\": \"miqat-wasm\"", &format!("\"name\": \"{}\"", NPM_NAME)))?;
            println!("  ✅ package.json name = {}", NPM_NAME);
        }
        for doc in ["README.md", "LICENSE"] {
            let src = self.path(doc);
            if src.exists() {
                fs::copy(&src, pkg.join(doc)).with_context(|| format!("Failed to copy {}", doc))?;
            }
        }

        println!("\n✅ WASM ready: dist/web/ (browser), pkg/ (NPM)");
        Ok(())
    }

    fn dev_web(&self) -> Result<()> {
        self.dist_web()?;

        let dev = self.path("dist/dev");
        fs::create_dir_all(&dev)?;
        for entry in fs::read_dir(self.path("dist/web"))? {
            let entry = entry?;
            if entry.path().is_file() {
                fs::copy(entry.path(), dev.join(entry.file_name()))?;
            }
        }
        fs::write(dev.join("index.html"), DEV_PAGE)?;

        println!("\n✅ Test page ready in dist/dev/");
        println!("   python -m http.server 8080 -d dist/dev");
        println!("   then open http://localhost:8080");
        Ok(())
    }

    fn build_all(&self) -> Result<()> {
        self.sync_versions()?;
        println!("\n🦀 Release build...");
        run_in(&self.root, "cargo", &["build", "--release", "-p", "miqat"])?;
        self.dist_web()?;
        self.sync_versions()?;
        println!("\n✅ All targets built: target/release, dist/web/, pkg/");
        Ok(())
    }

    fn publish_crates(&self, dry_run: bool) -> Result<()> {
        println!("\n📦 Publishing to crates.io{}...\n", if dry_run { " (dry run)" } else { "" });
        for (name, rel) in PUBLISH_ORDER {
            let mut args = vec!["publish"];
            if dry_run {
                args.push("--dry-run");
            }
            let output = Command::new("cargo")
                .args(&args)
                .current_dir(self.path(rel))
                .output()
                .with_context(|| format!("Failed to run cargo publish for {}", name))?;

            let stderr = String::from_utf8_lossy(&output.stderr);
            if output.status.success() {
                println!("  ✅ {}", name);
            } else if stderr.contains("already exists") {
                println!("  ⏭️  {} already on crates.io", name);
                continue;
            } else {
                eprintln!("{}", String::from_utf8_lossy(&output.stdout));
                eprintln!("{}", stderr);
                bail!("Failed to publish {}", name);
            }

            if !dry_run {
                // Dependents fail to resolve until the index catches up.
                thread::sleep(Duration::from_secs(30));
            }
        }
        Ok(())
    }

    fn publish_npm(&self, dry_run: bool) -> Result<()> {
        let pkg = self.path("pkg");
        if !pkg.join(format!("{}_bg.wasm", WASM_OUT_NAME)).exists() {
            println!("  ⚠️ pkg/ not built yet");
            self.dist_web()?;
        }
        self.sync_versions()?;

        let mut args = vec!["publish", "--access", "public"];
        if dry_run {
            args.push("--dry-run");
        }
        run_in(&pkg, "npm", &args)?;
        println!("\n✅ NPM {}", if dry_run { "validation complete" } else { "publish complete" });
        Ok(())
    }
}

/// Reads `version = "..."` from the `[workspace.package]` table.
fn workspace_version(manifest: &str) -> Option<String> {
    let mut in_table = false;
    for line in manifest.lines().map(str::trim) {
        if line.starts_with('[') {
            in_table = line == "[workspace.package]";
            continue;
        }
        if in_table {
            if let Some(rest) = line.strip_prefix("version") {
                return rest.split('"').nth(1).map(str::to_string);
            }
        }
    }
    None
}

/// Replaces the first top-level `"version"` entry, keeping indentation.
fn set_json_version(json: &str, version: &str) -> String {
    let mut done = false;
    let mut out: Vec<String> = json
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if !done && trimmed.starts_with("\"version\"") {
                done = true;
                let indent = &line[..line.len() - trimmed.len()];
                let comma = if trimmed.trim_end().ends_with(',') { "," } else { "" };
                format!("{}\"version\": \"{}\"{}", indent, version, comma)
            } else {
                line.to_string()
            }
        })
        .collect();
    if json.ends_with('\n') {
        out.push(String::new());
    }
    out.join("\n")
}

fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    println!("  → [{}] {} {}", dir.display(), program, args.join(" "));

    // npm and friends are .cmd shims on Windows.
    #[cfg(windows)]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.args(["/C", program]);
        c
    };
    #[cfg(not(windows))]
    let mut cmd = Command::new(program);

    let status = cmd
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to start {} {}", program, args.join(" ")))?;

    if !status.success() {
        bail!("{} exited with {:?}", program, status.code());
    }
    Ok(())
}

fn command_exists(program: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

const DEV_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>miqat - WASM Test</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
        h1 { color: #0f5132; }
        label { display: inline-block; margin: 0.25rem 0.75rem 0.25rem 0; }
        input, select { padding: 0.4rem; font-size: 1rem; }
        button { padding: 0.5rem 1rem; font-size: 1rem; background: #0f5132; color: white; border: none; cursor: pointer; }
        table { border-collapse: collapse; margin-top: 1rem; }
        td { padding: 0.3rem 1rem; border-bottom: 1px solid #ddd; }
        .arabic { font-size: 1.2rem; direction: rtl; }
        #meta { margin-top: 1rem; color: #555; }
    </style>
</head>
<body>
    <h1>🕌 miqat - Prayer Times</h1>
    <div>
        <label>Date <input type="date" id="date"></label>
        <label>Lat <input type="number" step="0.0001" id="lat" value="-6.2088"></label>
        <label>Lng <input type="number" step="0.0001" id="lng" value="106.8456"></label>
        <label>UTC offset <input type="number" step="0.5" id="tz" placeholder="estimate"></label>
        <label>Method <select id="method"></select></label>
        <button id="go">Calculate</button>
    </div>
    <table id="times"></table>
    <div id="meta"></div>

    <script type="module">
        import init, { prayerTimes, methods, qibla } from './miqat.js';

        await init();
        const select = document.getElementById('method');
        for (const m of methods()) {
            const opt = new Option(`${m.name} (${m.description})`, m.id);
            if (m.id === 3) opt.selected = true;
            select.add(opt);
        }
        document.getElementById('date').valueAsDate = new Date();

        document.getElementById('go').onclick = () => {
            const value = (id) => document.getElementById(id).value;
            const lat = parseFloat(value('lat'));
            const lng = parseFloat(value('lng'));
            const tz = value('tz') === '' ? undefined : parseFloat(value('tz'));
            try {
                const day = prayerTimes(value('date'), lat, lng, tz, parseInt(value('method')), undefined);
                document.getElementById('times').innerHTML = day.times
                    .map(t => `<tr><td>${t.name}</td><td class="arabic">${t.arabicName}</td><td>${t.time}</td></tr>`)
                    .join('');
                document.getElementById('meta').textContent =
                    `${day.hijri ?? ''}  ·  Qibla ${qibla(lat, lng).toFixed(1)}°`;
            } catch (e) {
                document.getElementById('meta').textContent = `Error: ${e}`;
            }
        };
    </script>
</body>
</html>"#;
