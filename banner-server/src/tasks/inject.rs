use std::path::{Path, PathBuf};

use eyre::{ContextCompat, WrapErr};

const SCRIPT_MARKER: &str = "TrendingMoviesBanner";
const SCRIPT_ROUTE: &str = "/TrendingMoviesBanner/script";
const BODY_CLOSE: &str = "</body>";
const COMMON_WEB_PATHS: [&str; 3] = [
    "/jellyfin/jellyfin-web",
    "/usr/share/jellyfin/web",
    "/usr/lib/jellyfin/bin/jellyfin-web",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InjectOutcome {
    Injected,
    AlreadyPresent,
    NoBodyTag,
}

/// Add the banner script tag to the web client's `index.html`, once.
///
/// Every failure is logged; the server keeps running and users can add the
/// tag by hand.
///
/// `public_url` is the banner server's origin as seen by browsers; empty means
/// the web client and this server share an origin behind a reverse proxy.
pub(crate) fn run_injection(configured_web_path: Option<&Path>, public_url: &str) {
    let candidates = candidate_web_dirs();
    let Some(web_dir) = resolve_web_dir(configured_web_path, &candidates) else {
        tracing::warn!(
            "inject: could not find the web client directory; add the banner script tag manually"
        );
        return;
    };

    let index_path = web_dir.join("index.html");
    if !index_path.is_file() {
        tracing::warn!("inject: index.html not found at {}", index_path.display());
        return;
    }

    match inject_script_tag(&index_path, public_url) {
        Ok(InjectOutcome::Injected) => {
            tracing::info!("inject: added banner script to {}", index_path.display())
        }
        Ok(InjectOutcome::AlreadyPresent) => {
            tracing::info!("inject: banner script already present in index.html")
        }
        Ok(InjectOutcome::NoBodyTag) => {
            tracing::warn!("inject: no </body> tag in {}", index_path.display())
        }
        Err(e) if is_permission_denied(&e) => tracing::error!(
            "inject: permission denied writing {}; grant write access or add the tag manually: {e:#}",
            index_path.display()
        ),
        Err(e) => tracing::error!("inject: failed to inject banner script: {e:#}"),
    }
}

fn candidate_web_dirs() -> Vec<PathBuf> {
    let mut candidates = COMMON_WEB_PATHS.map(PathBuf::from).to_vec();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join("jellyfin-web"));
    }
    candidates
}

/// The configured directory wins outright; otherwise the first existing
/// candidate.
pub(crate) fn resolve_web_dir(configured: Option<&Path>, candidates: &[PathBuf]) -> Option<PathBuf> {
    if let Some(path) = configured {
        return path.is_dir().then(|| path.to_path_buf());
    }

    tracing::warn!("inject: web path is not set, trying common locations");
    let found = candidates.iter().find(|path| path.is_dir()).cloned();
    if let Some(path) = &found {
        tracing::info!("inject: found web path at {}", path.display());
    }
    found
}

fn script_tag(public_url: &str) -> String {
    format!(
        r#"<script plugin="TrendingMoviesBanner" defer="defer" version="1.0.0.0" src="{}{SCRIPT_ROUTE}"></script>"#,
        public_url.trim_end_matches('/')
    )
}

pub(crate) fn inject_script_tag(index_path: &Path, public_url: &str) -> eyre::Result<InjectOutcome> {
    let contents = std::fs::read_to_string(index_path).wrap_err("read index.html")?;

    let Some(patched) = patch_index_html(&contents, &script_tag(public_url)) else {
        return Ok(if contents.contains(SCRIPT_MARKER) {
            InjectOutcome::AlreadyPresent
        } else {
            InjectOutcome::NoBodyTag
        });
    };

    write_atomic(index_path, patched.as_bytes())?;
    Ok(InjectOutcome::Injected)
}

/// `None` when the marker is already present or there is nowhere to insert.
fn patch_index_html(contents: &str, tag: &str) -> Option<String> {
    if contents.contains(SCRIPT_MARKER) || !contents.contains(BODY_CLOSE) {
        return None;
    }
    Some(contents.replace(BODY_CLOSE, &format!("{tag}\n{BODY_CLOSE}")))
}

fn write_atomic(path: &Path, contents: &[u8]) -> eyre::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .wrap_err("invalid output filename")?;
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));
    std::fs::write(&tmp_path, contents).wrap_err("write temp file")?;
    std::fs::rename(&tmp_path, path).wrap_err("rename temp file")?;
    Ok(())
}

fn is_permission_denied(e: &eyre::Report) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
}
