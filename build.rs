use std::env;
use std::fs;
use std::io;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR is not set");
        return;
    };
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.exists() {
        println!("cargo:warning=frontend/dist not found, embedding a placeholder page");
        println!("cargo:warning=build the frontend with: cd frontend && bun install && bun run build");

        if let Err(e) = create_fallback_files(&dist_path) {
            println!("cargo:warning=failed to write placeholder frontend: {e}");
        }
    }
}

// rust-embed 要求目录存在，前端未构建时写入占位页
fn create_fallback_files(dist_path: &Path) -> io::Result<()> {
    fs::create_dir_all(dist_path.join("assets"))?;

    let fallback_html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>EduNova ERP - frontend not built</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 600px;
            margin: 100px auto;
            padding: 20px;
            text-align: center;
            color: #1e293b;
        }
        .notice {
            background: #eef2ff;
            border: 1px solid #c7d2fe;
            padding: 20px;
            border-radius: 8px;
            margin: 20px 0;
        }
        code {
            background: #f1f5f9;
            padding: 2px 6px;
            border-radius: 4px;
            font-family: monospace;
        }
    </style>
</head>
<body>
    <h1>EduNova ERP</h1>
    <div class="notice">
        <h2>Frontend not built</h2>
        <p>The API is running at <code>/api</code>.</p>
        <p>To serve the web app, build it first:</p>
        <p><code>cd frontend && bun install && bun run build</code></p>
    </div>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), fallback_html)?;
    fs::write(dist_path.join("favicon.ico"), [])?;
    Ok(())
}
