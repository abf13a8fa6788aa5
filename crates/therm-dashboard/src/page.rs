//! Embedded single-page dashboard.
//!
//! The page is compiled into the binary and served from GET / with no
//! external assets, so the dashboard keeps working on an isolated network.

use axum::http::header;
use axum::response::{Html, IntoResponse};

/// Handle GET / - serve the dashboard page.
pub async fn dashboard_page() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "public, max-age=60")],
        Html(DASHBOARD_HTML),
    )
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Temperature Dashboard</title>
    <style>
        :root {
            --bg: #0f172a;
            --surface: #1e293b;
            --border: #334155;
            --text: #e2e8f0;
            --muted: #94a3b8;
            --accent: #38bdf8;
            --ok: #34d399;
            --warn: #fbbf24;
            --err: #f87171;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg);
            color: var(--text);
            min-height: 100vh;
        }
        .container { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
        header {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 1.5rem;
        }
        h1 { font-size: 1.25rem; font-weight: 600; }
        .badge {
            padding: 0.25rem 0.75rem;
            border-radius: 9999px;
            font-size: 0.75rem;
            font-weight: 600;
            background: var(--border);
            color: var(--muted);
        }
        .badge.live { background: var(--ok); color: var(--bg); }
        .badge.synthetic { background: var(--warn); color: var(--bg); }
        .card {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1rem;
            margin-bottom: 1rem;
        }
        .chart-row { display: flex; gap: 0.5rem; }
        .y-labels {
            display: flex;
            flex-direction: column;
            justify-content: space-between;
            font-size: 0.7rem;
            color: var(--muted);
            text-align: right;
            padding: 0 0.25rem 0 0;
        }
        .chart-wrap { position: relative; flex: 1; }
        svg { display: block; width: 100%; height: 300px; background: var(--bg); border-radius: 0.25rem; }
        .x-labels {
            display: flex;
            justify-content: space-between;
            font-size: 0.7rem;
            color: var(--muted);
            margin-top: 0.25rem;
        }
        #tooltip {
            position: absolute;
            display: none;
            transform: translate(-50%, -120%);
            background: var(--bg);
            border: 1px solid var(--accent);
            border-radius: 0.25rem;
            padding: 0.25rem 0.5rem;
            font-size: 0.75rem;
            pointer-events: none;
            white-space: nowrap;
        }
        .controls {
            display: flex;
            align-items: center;
            gap: 1rem;
            flex-wrap: wrap;
            font-size: 0.85rem;
        }
        select, input, button {
            background: var(--bg);
            color: var(--text);
            border: 1px solid var(--border);
            border-radius: 0.25rem;
            padding: 0.35rem 0.6rem;
            font-size: 0.85rem;
        }
        button { cursor: pointer; }
        button:hover { border-color: var(--accent); color: var(--accent); }
        label { display: inline-flex; align-items: center; gap: 0.35rem; color: var(--muted); }
        form { display: flex; gap: 0.5rem; align-items: center; flex-wrap: wrap; }
        .note { font-size: 0.8rem; }
        .note.ok { color: var(--ok); }
        .note.err { color: var(--err); }
        .stats { display: flex; gap: 2rem; font-size: 0.85rem; color: var(--muted); }
        .stats strong { color: var(--text); font-size: 1.1rem; }
    </style>
</head>
<body>
<div class="container">
    <header>
        <h1>Temperature Dashboard</h1>
        <span id="badge" class="badge">loading</span>
    </header>

    <div class="card">
        <div class="chart-row">
            <div class="y-labels"><span>50&deg;</span><span>40&deg;</span><span>30&deg;</span><span>20&deg;</span></div>
            <div class="chart-wrap">
                <svg id="chart" viewBox="0 0 800 300" preserveAspectRatio="none">
                    <line x1="0" y1="0" x2="800" y2="0" stroke="#334155" stroke-width="1" vector-effect="non-scaling-stroke"/>
                    <line x1="0" y1="100" x2="800" y2="100" stroke="#334155" stroke-width="1" vector-effect="non-scaling-stroke"/>
                    <line x1="0" y1="200" x2="800" y2="200" stroke="#334155" stroke-width="1" vector-effect="non-scaling-stroke"/>
                    <line x1="0" y1="300" x2="800" y2="300" stroke="#334155" stroke-width="1" vector-effect="non-scaling-stroke"/>
                    <polyline id="trace" fill="none" stroke="#38bdf8" stroke-width="2" vector-effect="non-scaling-stroke" points=""/>
                    <circle id="marker" r="4" fill="#38bdf8" visibility="hidden"/>
                </svg>
                <div id="tooltip"></div>
                <div class="x-labels"><span id="x-first"></span><span id="x-last"></span></div>
            </div>
        </div>
    </div>

    <div class="card controls">
        <label>device
            <select id="device"><option value="">all devices</option></select>
        </label>
        <label><input type="checkbox" id="auto"> auto refresh</label>
        <label>every
            <select id="interval">
                <option value="5">5s</option>
                <option value="10">10s</option>
                <option value="30" selected>30s</option>
                <option value="60">60s</option>
                <option value="300">5m</option>
            </select>
        </label>
        <button id="refresh-now">refresh now</button>
        <div class="stats">
            <span>latest <strong id="stat-latest">-</strong></span>
            <span>stored <strong id="stat-total">-</strong></span>
        </div>
    </div>

    <div class="card">
        <form id="reading-form">
            <input type="number" id="temperature" step="0.1" min="-50" max="100" placeholder="temperature &deg;C" required>
            <input type="text" id="form-device" placeholder="device id (optional)">
            <button type="submit">submit reading</button>
            <span id="form-note" class="note"></span>
        </form>
    </div>
</div>

<script>
const api = url => fetch(url).then(r => r.json());

const WIDTH = 800, HEIGHT = 300;
const AXIS_MIN = 20, AXIS_MAX = 50;
const HIT_THRESHOLD = 20;
const POINT_COUNT = 60;

let points = [];
let timer = null;

function xFor(i, n) {
    if (n === 1) return WIDTH / 2;
    return WIDTH * i / (n - 1);
}

function yFor(t) {
    return HEIGHT * (1 - (t - AXIS_MIN) / (AXIS_MAX - AXIS_MIN));
}

// Oldest first, ties broken by id, so the trace reads left to right.
function toDisplay(readings) {
    const rows = [...readings].sort((a, b) =>
        a.timestamp < b.timestamp ? -1 :
        a.timestamp > b.timestamp ? 1 :
        a.id - b.id);
    return rows.map((r, i) => ({
        x: xFor(i, rows.length),
        y: yFor(r.temperature),
        temperature: r.temperature,
        label: new Date(r.timestamp).toLocaleTimeString('en-GB'),
        device: r.device_id,
    }));
}

// Placeholder series shown while the server is unreachable. Same shape as
// the server-side generator: slow sine wave, per-point jitter, random walk.
function syntheticReadings() {
    const now = Date.now();
    const rows = [];
    let drift = 0;
    for (let i = 0; i < POINT_COUNT; i++) {
        drift += (Math.random() - 0.5) * 0.3;
        const wave = 32 + 6 * Math.sin(2 * Math.PI * i / POINT_COUNT);
        const jitter = (Math.random() - 0.5) * 1.6;
        const t = Math.min(AXIS_MAX, Math.max(AXIS_MIN, wave + jitter + drift));
        rows.push({
            id: i + 1,
            temperature: Math.round(t * 100) / 100,
            timestamp: new Date(now - (POINT_COUNT - 1 - i) * 60000).toISOString(),
            device_id: 'synthetic',
        });
    }
    return rows;
}

function render(total) {
    const trace = document.getElementById('trace');
    trace.setAttribute('points', points.map(p => p.x + ',' + p.y).join(' '));
    document.getElementById('x-first').textContent = points.length ? points[0].label : '';
    document.getElementById('x-last').textContent = points.length > 1 ? points[points.length - 1].label : '';
    const latest = points.length ? points[points.length - 1].temperature.toFixed(1) + '°C' : '-';
    document.getElementById('stat-latest').textContent = latest;
    document.getElementById('stat-total').textContent = total === null ? '-' : total;
    hideTooltip();
}

function setBadge(cls, text) {
    const badge = document.getElementById('badge');
    badge.className = 'badge ' + cls;
    badge.textContent = text;
}

async function refresh() {
    const device = document.getElementById('device').value;
    let url = '/api?limit=' + POINT_COUNT;
    if (device) url += '&device_id=' + encodeURIComponent(device);
    try {
        const body = await api(url);
        if (!body.ok) throw new Error(body.error);
        points = toDisplay(body.data);
        setBadge('live', 'live');
        render(body.meta.total);
    } catch (err) {
        points = toDisplay(syntheticReadings());
        setBadge('synthetic', 'synthetic, server unreachable');
        render(null);
    }
}

// Reconfiguring always drops the old timer before arming a new one, so at
// most one timer exists. An in-flight fetch is never aborted.
function configureTimer() {
    if (timer !== null) {
        clearInterval(timer);
        timer = null;
    }
    if (document.getElementById('auto').checked) {
        const secs = Number(document.getElementById('interval').value);
        timer = setInterval(refresh, secs * 1000);
    }
}

// Nearest point by horizontal distance; first point wins ties. Out of
// range when the nearest is HIT_THRESHOLD or more pixels away.
function hitTest(mouseX) {
    let best = -1, bestDist = Infinity;
    points.forEach((p, i) => {
        const d = Math.abs(p.x - mouseX);
        if (d < bestDist) { best = i; bestDist = d; }
    });
    return bestDist < HIT_THRESHOLD ? best : -1;
}

function hideTooltip() {
    document.getElementById('tooltip').style.display = 'none';
    document.getElementById('marker').setAttribute('visibility', 'hidden');
}

function showTooltip(i) {
    const svg = document.getElementById('chart');
    const rect = svg.getBoundingClientRect();
    const p = points[i];
    const marker = document.getElementById('marker');
    marker.setAttribute('cx', p.x);
    marker.setAttribute('cy', p.y);
    marker.setAttribute('visibility', 'visible');
    const tip = document.getElementById('tooltip');
    tip.textContent = p.temperature.toFixed(1) + '°C at ' + p.label + ' (' + p.device + ')';
    tip.style.left = (p.x / WIDTH * rect.width) + 'px';
    tip.style.top = (p.y / HEIGHT * rect.height) + 'px';
    tip.style.display = 'block';
}

async function loadDevices() {
    try {
        const body = await api('/api/devices');
        if (!body.ok) return;
        const select = document.getElementById('device');
        for (const d of body.data) {
            const opt = document.createElement('option');
            opt.value = d.device_id;
            opt.textContent = d.device_id + ' (' + d.readings + ')';
            select.appendChild(opt);
        }
    } catch (err) {
        // The filter stays empty; the chart still works unfiltered.
    }
}

async function submitReading(e) {
    e.preventDefault();
    const note = document.getElementById('form-note');
    const payload = { temperature: Number(document.getElementById('temperature').value) };
    const device = document.getElementById('form-device').value.trim();
    if (device) payload.device_id = device;
    try {
        const res = await fetch('/api', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(payload),
        });
        const body = await res.json();
        if (body.ok) {
            note.textContent = 'stored reading #' + body.id;
            note.className = 'note ok';
            refresh();
        } else {
            note.textContent = body.error;
            note.className = 'note err';
        }
    } catch (err) {
        note.textContent = 'server unreachable';
        note.className = 'note err';
    }
}

async function init() {
    document.getElementById('auto').addEventListener('change', configureTimer);
    document.getElementById('interval').addEventListener('change', configureTimer);
    document.getElementById('refresh-now').addEventListener('click', refresh);
    document.getElementById('device').addEventListener('change', refresh);
    document.getElementById('reading-form').addEventListener('submit', submitReading);

    const svg = document.getElementById('chart');
    svg.addEventListener('mousemove', e => {
        const rect = svg.getBoundingClientRect();
        const mouseX = (e.clientX - rect.left) * (WIDTH / rect.width);
        const i = hitTest(mouseX);
        if (i === -1) { hideTooltip(); } else { showTooltip(i); }
    });
    svg.addEventListener('mouseleave', hideTooltip);

    await loadDevices();
    await refresh();
    configureTimer();
}

init();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_self_contained() {
        assert!(DASHBOARD_HTML.starts_with("<!DOCTYPE html>"));
        // No CDN scripts or stylesheets; the page must work offline.
        assert!(!DASHBOARD_HTML.contains("http://"));
        assert!(!DASHBOARD_HTML.contains("https://"));
    }

    #[test]
    fn page_drives_the_json_api() {
        assert!(DASHBOARD_HTML.contains("/api?limit="));
        assert!(DASHBOARD_HTML.contains("/api/devices"));
        assert!(DASHBOARD_HTML.contains("method: 'POST'"));
    }

    #[test]
    fn page_offers_the_supported_refresh_intervals() {
        for value in ["\"5\"", "\"10\"", "\"30\"", "\"60\"", "\"300\""] {
            assert!(
                DASHBOARD_HTML.contains(&format!("option value={value}")),
                "missing interval option {value}"
            );
        }
    }
}
