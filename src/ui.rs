pub fn render_index(zone: &str, page_limit: usize) -> String {
    INDEX_HTML
        .replace("{{ZONE}}", zone)
        .replace("{{PAGE_LIMIT}}", &page_limit.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Lifeguard Flag Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #e8f4f8;
      --bg-2: #a7d3f5;
      --ink: #1f2a30;
      --accent: #eb5757;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f4efe1 60%, #fbf7ee 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1040px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 14px;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    button, select {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    button:disabled {
      opacity: 0.4;
      cursor: default;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th, td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .weekday {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b857d;
      text-align: center;
    }

    .cell {
      min-height: 72px;
      border-radius: 12px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.04);
      cursor: pointer;
      display: grid;
      align-content: start;
      gap: 4px;
    }

    .cell.empty {
      background: transparent;
      cursor: default;
    }

    .markers {
      display: flex;
      flex-wrap: wrap;
      gap: 3px;
    }

    .marker {
      width: 9px;
      height: 9px;
      border-radius: 50%;
    }

    .badge {
      font-size: 0.75rem;
      font-weight: 600;
      color: var(--accent);
    }

    .bars {
      display: grid;
      gap: 8px;
    }

    .bar {
      display: grid;
      grid-template-columns: 180px 1fr 70px;
      align-items: center;
      gap: 10px;
      font-size: 0.9rem;
    }

    .bar .fill {
      height: 12px;
      border-radius: 999px;
    }

    .periods {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 16px;
    }

    .notice {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
      padding: 12px 16px;
      border-radius: 14px;
      background: #fdecea;
      color: #c63b2b;
    }

    .hidden {
      display: none;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Lifeguard Flags</h1>
      <p class="subtitle">Beach warning flags as recorded by the lifeguard stands. Times shown in {{ZONE}}.</p>
    </header>

    <div class="notice hidden" id="notice" role="alert">
      <span id="notice-text"></span>
      <button type="button" id="notice-close">Dismiss</button>
    </div>

    <section class="card">
      <div class="row">
        <h2>Flag distribution</h2>
        <button type="button" id="refresh">Refresh</button>
      </div>
      <div class="periods" id="periods"></div>
    </section>

    <section class="card">
      <div class="row">
        <button type="button" id="prev-month">&larr;</button>
        <h2 id="month-title"></h2>
        <button type="button" id="next-month">&rarr;</button>
      </div>
      <div class="calendar" id="calendar"></div>
      <div id="day-detail"></div>
    </section>

    <section class="card">
      <div class="row">
        <select id="table-select"></select>
        <div>
          <button type="button" id="prev-page">Previous</button>
          <span id="page-label"></span>
          <button type="button" id="next-page">Next</button>
        </div>
      </div>
      <table>
        <thead><tr id="table-head"></tr></thead>
        <tbody id="table-body"></tbody>
      </table>
    </section>

    <p class="hint">Calendar days follow local time, so a late-evening flag stays on the day it was raised.</p>
  </main>

  <script>
    const PAGE_LIMIT = {{PAGE_LIMIT}};
    const MONTHS = ['January', 'February', 'March', 'April', 'May', 'June', 'July',
      'August', 'September', 'October', 'November', 'December'];
    const WEEKDAYS = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'];
    const FLAG_COLORS = {
      'yellow flag': '#f2c94c',
      'red flag': '#eb5757',
      'double red flag': '#9b1c1c',
      'red over purple flag': '#8e44ad',
      'yellow over purple flag': '#b58900'
    };

    const noticeEl = document.getElementById('notice');
    const noticeText = document.getElementById('notice-text');
    const periodsEl = document.getElementById('periods');
    const calendarEl = document.getElementById('calendar');
    const monthTitle = document.getElementById('month-title');
    const dayDetail = document.getElementById('day-detail');
    const tableSelect = document.getElementById('table-select');
    const tableHead = document.getElementById('table-head');
    const tableBody = document.getElementById('table-body');
    const pageLabel = document.getElementById('page-label');
    const prevPage = document.getElementById('prev-page');
    const nextPage = document.getElementById('next-page');

    const view = {
      table: { name: null, offset: 0, next: null, previous: null },
      month: { year: new Date().getFullYear(), month: new Date().getMonth() + 1, previous: null, next: null }
    };

    // Latest request id per panel; older responses and failures are dropped.
    const latest = {};
    const request = async (panel, url) => {
      const id = (latest[panel] || 0) + 1;
      latest[panel] = id;
      const current = () => latest[panel] === id;
      try {
        const res = await fetch(url);
        if (!res.ok) {
          throw new Error((await res.text()) || `HTTP ${res.status}`);
        }
        const body = await res.json();
        return current() ? body : null;
      } catch (err) {
        if (!current()) return null;
        throw err;
      }
    };

    const showError = (message) => {
      noticeText.textContent = message;
      noticeEl.classList.remove('hidden');
    };

    document.getElementById('notice-close').addEventListener('click', () => {
      noticeEl.classList.add('hidden');
    });

    const colorFor = (label) => FLAG_COLORS[label] || '#9e9e9e';

    const renderDistribution = (data) => {
      periodsEl.innerHTML = '';
      data.periods.forEach((period) => {
        const card = document.createElement('div');
        card.className = 'bars';
        const title = document.createElement('strong');
        title.textContent = `${period.period} (${period.total})`;
        card.appendChild(title);
        if (!period.categories.length) {
          const empty = document.createElement('span');
          empty.className = 'hint';
          empty.textContent = 'No flags recorded';
          card.appendChild(empty);
        }
        period.categories.forEach((category) => {
          const bar = document.createElement('div');
          bar.className = 'bar';
          const width = period.total ? (category.count / period.total) * 100 : 0;
          bar.innerHTML = `<span></span><div class="fill" style="width:${width}%;background:${category.color}"></div><span>${category.count} &middot; ${category.percentage}</span>`;
          bar.firstChild.textContent = category.label;
          card.appendChild(bar);
        });
        periodsEl.appendChild(card);
      });
    };

    const renderDay = (data) => {
      dayDetail.innerHTML = '';
      const title = document.createElement('strong');
      title.textContent = `${data.date}: ${data.count} flag(s)`;
      dayDetail.appendChild(title);
      const list = document.createElement('ul');
      data.events.forEach((event) => {
        const item = document.createElement('li');
        item.textContent = `${event.time || '--'} ${event.flag_type}`;
        list.appendChild(item);
      });
      dayDetail.appendChild(list);
    };

    const renderCalendar = (data) => {
      view.month = { year: data.year, month: data.month, previous: data.previous, next: data.next };
      monthTitle.textContent = `${MONTHS[data.month - 1]} ${data.year}`;
      calendarEl.innerHTML = WEEKDAYS.map((day) => `<span class="weekday">${day}</span>`).join('');
      data.cells.forEach((cell) => {
        const el = document.createElement('div');
        if (!cell.date) {
          el.className = 'cell empty';
          calendarEl.appendChild(el);
          return;
        }
        el.className = 'cell';
        const label = document.createElement('span');
        label.textContent = cell.day;
        el.appendChild(label);
        if (cell.badge) {
          const badge = document.createElement('span');
          badge.className = 'badge';
          badge.textContent = cell.badge;
          el.appendChild(badge);
        } else if (cell.count) {
          const markers = document.createElement('div');
          markers.className = 'markers';
          cell.events.forEach((event) => {
            const dot = document.createElement('span');
            dot.className = 'marker';
            dot.style.background = colorFor(event.flag_type);
            dot.title = `${event.time || ''} ${event.flag_type}`;
            markers.appendChild(dot);
          });
          el.appendChild(markers);
        }
        el.addEventListener('click', () => loadDay(cell.date));
        calendarEl.appendChild(el);
      });
    };

    const renderTable = (data) => {
      const p = data.pagination;
      view.table.offset = p.offset;
      view.table.next = p.next_offset;
      view.table.previous = p.previous_offset;
      pageLabel.textContent = `Page ${p.page} of ${Math.max(1, Math.ceil(p.total_rows / p.limit))}`;
      prevPage.disabled = p.previous_offset === null;
      nextPage.disabled = p.next_offset === null;

      tableHead.innerHTML = '';
      tableBody.innerHTML = '';
      ['id', 'flag_type', 'local_time'].forEach((column) => {
        const th = document.createElement('th');
        th.textContent = column;
        tableHead.appendChild(th);
      });
      data.data.forEach((row) => {
        const tr = document.createElement('tr');
        [row.id, row.flag_type, row.local_time || ''].forEach((value) => {
          const td = document.createElement('td');
          td.textContent = value;
          tr.appendChild(td);
        });
        tableBody.appendChild(tr);
      });
    };

    const loadDistribution = async () => {
      const data = await request('distribution', '/api/distribution');
      if (data) renderDistribution(data);
    };

    const loadMonth = async (year, month) => {
      const data = await request('calendar', `/api/calendar/${year}/${month}`);
      if (data) renderCalendar(data);
    };

    const loadDay = async (date) => {
      try {
        const data = await request('day', `/api/day/${date}`);
        if (data) renderDay(data);
      } catch (err) {
        showError(`Failed to load day: ${err.message}`);
      }
    };

    const loadTable = async (offset) => {
      if (!view.table.name) return;
      const url = `/api/table-data/${encodeURIComponent(view.table.name)}?limit=${PAGE_LIMIT}&offset=${offset}`;
      const data = await request('table', url);
      if (data) renderTable(data);
    };

    const loadTables = async () => {
      const data = await request('tables', '/api/tables');
      if (!data) return;
      tableSelect.innerHTML = '';
      data.tables.forEach((name) => {
        const option = document.createElement('option');
        option.value = name;
        option.textContent = name;
        tableSelect.appendChild(option);
      });
      view.table.name = data.tables.includes('flags') ? 'flags' : data.tables[0] || null;
      tableSelect.value = view.table.name || '';
    };

    const guarded = (label, task) => task().catch((err) => showError(`${label}: ${err.message}`));

    const stepMonth = (target) => {
      if (target) guarded('Failed to load month', () => loadMonth(target.year, target.month));
    };
    document.getElementById('prev-month').addEventListener('click', () => stepMonth(view.month.previous));
    document.getElementById('next-month').addEventListener('click', () => stepMonth(view.month.next));
    prevPage.addEventListener('click', () => {
      if (view.table.previous !== null) guarded('Failed to load data', () => loadTable(view.table.previous));
    });
    nextPage.addEventListener('click', () => {
      if (view.table.next !== null) guarded('Failed to load data', () => loadTable(view.table.next));
    });
    tableSelect.addEventListener('change', () => {
      view.table.name = tableSelect.value;
      guarded('Failed to load data', () => loadTable(0));
    });
    document.getElementById('refresh').addEventListener('click', () => {
      guarded('Failed to refresh', () => Promise.all([
        loadDistribution(),
        loadMonth(view.month.year, view.month.month),
        loadTable(view.table.offset)
      ]));
    });

    guarded('Failed to initialize', () => Promise.all([
      loadDistribution(),
      loadMonth(view.month.year, view.month.month),
      loadTables().then(() => loadTable(0))
    ]));
  </script>
</body>
</html>
"#;
