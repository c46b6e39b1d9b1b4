//! The bundled single page UI.
//!
//! Kept as a single static asset so the binary is self contained. Talks
//! to the document API with `fetch`, no build step.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>chunkview</title>
<style>
  body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
  h1 { font-size: 1.4rem; }
  .chunk { border-bottom: 1px solid #ccc; padding: .5rem 0; }
  .chunk .meta { color: #555; font-size: .85rem; }
  details { margin: .5rem 0; }
  pre { white-space: pre-wrap; }
  .error { color: #b00; }
  button { margin-right: .5rem; }
</style>
</head>
<body>
<h1>chunkview</h1>
<p>Upload a PDF to extract and view its contents page-wise.</p>

<input type="file" id="file" accept=".pdf">
<button id="upload">Upload</button>
<button id="parse" disabled>Parse</button>
<a id="export" hidden download>Download parsed chunks as PDF</a>
<p id="status"></p>

<h2>Chunks</h2>
<div id="chunks"></div>

<h2>Pages</h2>
<div id="pages"></div>

<script>
let documentId = null;

const status = (msg, error) => {
  const el = document.getElementById('status');
  el.textContent = msg;
  el.className = error ? 'error' : '';
};

document.getElementById('upload').onclick = async () => {
  const input = document.getElementById('file');
  if (!input.files.length) return status('Choose a file first.', true);

  const form = new FormData();
  form.append('file', input.files[0]);

  const res = await fetch('/documents', { method: 'POST', body: form });
  const body = await res.json();

  if (!res.ok || !body.documents.length) {
    return status('Upload failed: ' + JSON.stringify(body.errors ?? body), true);
  }

  documentId = body.documents[0].id;
  document.getElementById('parse').disabled = false;
  status('Uploaded ' + body.documents[0].name + '. Click Parse to analyse it.');
};

document.getElementById('parse').onclick = async () => {
  status('Parsing PDF...');

  const res = await fetch(`/documents/${documentId}/parse`, { method: 'POST' });
  if (!res.ok) return status('Error parsing document.', true);

  const chunks = await res.json();
  const container = document.getElementById('chunks');
  container.innerHTML = '';

  for (const chunk of chunks) {
    const div = document.createElement('div');
    div.className = 'chunk';
    const meta = document.createElement('div');
    meta.className = 'meta';
    meta.textContent = `Chunk ${chunk.ordinal}: page ${chunk.page}, type ${chunk.chunkType}`;
    const pre = document.createElement('pre');
    pre.textContent = chunk.text;
    div.append(meta, pre);
    container.append(div);
  }

  await loadPages();

  const link = document.getElementById('export');
  link.href = `/documents/${documentId}/export`;
  link.hidden = false;
  status(`Parsed ${chunks.length} chunks.`);
};

async function loadPages() {
  const res = await fetch(`/documents/${documentId}/pages`);
  if (!res.ok) return;

  const pages = await res.json();
  const container = document.getElementById('pages');
  container.innerHTML = '';

  for (const page of pages) {
    const details = document.createElement('details');
    const summary = document.createElement('summary');
    summary.textContent = `Page ${page.page}`;
    const pre = document.createElement('pre');
    pre.textContent = page.text;
    details.append(summary, pre);
    container.append(details);
  }
}
</script>
</body>
</html>
"#;
