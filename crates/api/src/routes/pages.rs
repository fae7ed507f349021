//! Static Pages and PWA Assets
//!
//! The root path content-negotiates between a service descriptor for
//! API clients and an HTML landing page for browsers; `/app` serves the
//! installable recorder page with its manifest and service worker.

use axum::extract::Query;
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct RootQuery {
    format: Option<String>,
}

/// Landing page, or the service descriptor when JSON is requested
pub async fn root(Query(query): Query<RootQuery>, headers: HeaderMap) -> impl IntoResponse {
    let wants_json = query.format.as_deref() == Some("json")
        || headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains("application/json"));

    if wants_json {
        Json(json!({
            "status": "active",
            "message": "AI Voice Detection System is running",
            "endpoints": {
                "detect": "/detect",
                "health": "/health",
                "app": "/app",
            },
        }))
        .into_response()
    } else {
        Html(LANDING_PAGE).into_response()
    }
}

/// Installable recorder page
pub async fn app_page() -> Html<&'static str> {
    Html(APP_PAGE)
}

/// Web app manifest
pub async fn manifest() -> impl IntoResponse {
    Json(json!({
        "name": "AI Voice Detection",
        "short_name": "VoiceDetect",
        "start_url": "/app",
        "display": "standalone",
        "background_color": "#101418",
        "theme_color": "#101418",
        "icons": [],
    }))
}

/// Service worker script
pub async fn service_worker() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], SW_JS)
}

const LANDING_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Voice Detection</title>
<style>
body{font-family:system-ui,sans-serif;background:#101418;color:#e8e8e8;margin:0;display:flex;min-height:100vh;align-items:center;justify-content:center}
main{max-width:40rem;padding:2rem}
a{color:#6cb4ee}
code{background:#1c232b;padding:0.15rem 0.4rem;border-radius:4px}
</style>
</head>
<body>
<main>
<h1>AI Voice Detection</h1>
<p>Submit a speech clip and receive a classification of
<strong>AI-Generated</strong> or <strong>Human</strong> with a confidence
score and an explanation of the strongest acoustic indicators.</p>
<p>POST base64-encoded audio to <code>/detect</code>, check liveness at
<code>/health</code>, or open the <a href="/app">recorder app</a>.</p>
</main>
</body>
</html>
"#;

const APP_PAGE: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="theme-color" content="#101418">
<link rel="manifest" href="/manifest.json">
<title>Voice Detect</title>
<style>
body{font-family:system-ui,sans-serif;background:#101418;color:#e8e8e8;margin:0;padding:2rem;max-width:32rem;margin-inline:auto}
button{font-size:1.1rem;padding:0.8rem 1.6rem;border:0;border-radius:8px;background:#2d6cdf;color:#fff;cursor:pointer}
button:disabled{background:#444}
#result{margin-top:1.5rem;padding:1rem;border-radius:8px;background:#1c232b;white-space:pre-wrap;display:none}
#result.shown{display:block}
</style>
</head>
<body>
<h1>Voice Detect</h1>
<p>Record a short clip or pick an audio file, then run detection.</p>
<p>
<button id="record">Record</button>
<input type="file" id="file" accept="audio/*">
<button id="submit" disabled>Detect</button>
</p>
<div id="result"></div>
<script>
let clip = null;
let recorder = null;
const recordBtn = document.getElementById('record');
const submitBtn = document.getElementById('submit');
const resultBox = document.getElementById('result');

document.getElementById('file').addEventListener('change', (e) => {
  clip = e.target.files[0] || null;
  submitBtn.disabled = !clip;
});

recordBtn.addEventListener('click', async () => {
  if (recorder && recorder.state === 'recording') {
    recorder.stop();
    recordBtn.textContent = 'Record';
    return;
  }
  const stream = await navigator.mediaDevices.getUserMedia({ audio: true });
  const chunks = [];
  recorder = new MediaRecorder(stream);
  recorder.ondataavailable = (e) => chunks.push(e.data);
  recorder.onstop = () => {
    clip = new Blob(chunks, { type: recorder.mimeType });
    stream.getTracks().forEach((t) => t.stop());
    submitBtn.disabled = false;
  };
  recorder.start();
  recordBtn.textContent = 'Stop';
});

submitBtn.addEventListener('click', async () => {
  if (!clip) return;
  submitBtn.disabled = true;
  resultBox.className = 'shown';
  resultBox.textContent = 'Analyzing...';
  const bytes = new Uint8Array(await clip.arrayBuffer());
  let binary = '';
  bytes.forEach((b) => { binary += String.fromCharCode(b); });
  const body = { audio_base64: btoa(binary) };
  try {
    const response = await fetch('/detect', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body),
    });
    const data = await response.json();
    if (!response.ok) {
      resultBox.textContent = 'Error: ' + data.detail;
    } else {
      resultBox.textContent = data.classification +
        ' (' + (data.confidence_score * 100).toFixed(1) + '%)\n\n' +
        data.explanation;
    }
  } catch (err) {
    resultBox.textContent = 'Request failed: ' + err;
  }
  submitBtn.disabled = false;
});

if ('serviceWorker' in navigator) {
  navigator.serviceWorker.register('/sw.js');
}
</script>
</body>
</html>
"##;

const SW_JS: &str = r#"const CACHE = 'voice-detect-v1';
const ASSETS = ['/app', '/manifest.json'];

self.addEventListener('install', (event) => {
  event.waitUntil(caches.open(CACHE).then((cache) => cache.addAll(ASSETS)));
});

self.addEventListener('activate', (event) => {
  event.waitUntil(
    caches.keys().then((keys) =>
      Promise.all(keys.filter((k) => k !== CACHE).map((k) => caches.delete(k)))
    )
  );
});

self.addEventListener('fetch', (event) => {
  if (event.request.method !== 'GET') return;
  event.respondWith(
    caches.match(event.request).then((hit) => hit || fetch(event.request))
  );
});
"#;
