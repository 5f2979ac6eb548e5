use crate::calculator::ActivityLevel;
use crate::date::{date_key, DateRange};
use crate::exercises::EXERCISE_TYPES;
use crate::nutrition::MEAL_TYPES;
use crate::tasks::TASK_CATEGORIES;

pub fn render_index(date: &str, range: &DateRange) -> String {
    let activity_levels = ActivityLevel::ALL
        .iter()
        .map(|level| format!("{:?}", level.multiplier()))
        .collect::<Vec<_>>()
        .join(",");

    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{RANGE_START}}", &range.start.map(date_key).unwrap_or_default())
        .replace("{{RANGE_END}}", &range.end.map(date_key).unwrap_or_default())
        .replace("{{EXERCISE_TYPES}}", &json_list(&EXERCISE_TYPES))
        .replace("{{MEAL_TYPES}}", &json_list(&MEAL_TYPES))
        .replace("{{TASK_CATEGORIES}}", &json_list(&TASK_CATEGORIES))
        .replace("{{ACTIVITY_MULTIPLIERS}}", &activity_levels)
}

fn json_list(items: &[&str]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f1e8;
      --bg-2: #cfe3d4;
      --ink: #25302b;
      --accent: #2f7a5b;
      --accent-2: #c9822b;
      --muted: #6d7670;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(37, 48, 43, 0.14);
      --late: #c9822b;
      --very-late: #c63b2b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eaf2ea 60%, #f7f5ee 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 28px 18px 48px;
    }

    header {
      text-align: center;
      margin-bottom: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0 0 6px;
    }

    h2 {
      margin: 0;
      font-size: 1.25rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .badge {
      display: inline-block;
      margin-top: 12px;
      padding: 8px 16px;
      border-radius: 999px;
      background: rgba(47, 122, 91, 0.1);
      font-weight: 600;
    }

    .layout {
      display: grid;
      grid-template-columns: 280px 1fr;
      gap: 24px;
      max-width: 1280px;
      margin: 0 auto;
    }

    .card {
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 22px;
      display: grid;
      gap: 16px;
      align-content: start;
    }

    .card-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .big {
      font-size: 1.8rem;
      font-weight: 600;
      color: var(--accent);
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      padding: 6px;
      background: rgba(37, 48, 43, 0.07);
      border-radius: 999px;
      margin-bottom: 20px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.ghost {
      background: transparent;
      color: var(--muted);
    }

    button.tab.active {
      background: white;
      color: var(--accent);
      box-shadow: 0 8px 16px rgba(37, 48, 43, 0.12);
    }

    button:disabled {
      opacity: 0.4;
      cursor: not-allowed;
    }

    .widgets {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(380px, 1fr));
      gap: 20px;
    }

    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      text-align: center;
    }

    .calendar-grid button {
      padding: 8px 0;
      border-radius: 10px;
      background: transparent;
      color: var(--ink);
    }

    .calendar-grid button.today {
      background: rgba(201, 130, 43, 0.2);
    }

    .calendar-grid button.selected {
      background: var(--accent);
      color: white;
    }

    .row {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
      padding: 12px;
      border-radius: 14px;
      background: rgba(37, 48, 43, 0.04);
    }

    .row .meta {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .row.done .title {
      text-decoration: line-through;
      color: var(--muted);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(110px, 1fr));
      gap: 10px;
    }

    .stat {
      background: white;
      border-radius: 14px;
      padding: 12px;
      border: 1px solid rgba(37, 48, 43, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.3rem;
      font-weight: 600;
    }

    form.entry {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 8px;
      padding: 12px;
      border-radius: 14px;
      border: 1px dashed rgba(37, 48, 43, 0.2);
    }

    form.entry label {
      display: grid;
      gap: 4px;
      font-size: 0.8rem;
      color: var(--muted);
    }

    input, select, textarea {
      font: inherit;
      padding: 6px 8px;
      border-radius: 8px;
      border: 1px solid rgba(37, 48, 43, 0.2);
    }

    .on_time { color: var(--accent); }
    .late { color: var(--late); }
    .very_late { color: var(--very-late); }

    .status {
      min-height: 1.2em;
      text-align: center;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--very-late);
    }

    .empty {
      text-align: center;
      color: var(--muted);
      padding: 18px 0;
    }

    @media (max-width: 900px) {
      .layout {
        grid-template-columns: 1fr;
      }
      .widgets {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <header>
    <h1>Daily Dashboard</h1>
    <p class="subtitle">Prayers, training, food, study and tasks, one day at a time.</p>
    <div class="badge" id="countdown" hidden></div>
  </header>

  <div class="layout">
    <aside class="card" id="calendar">
      <div class="card-head">
        <button class="ghost" type="button" id="month-prev">&lsaquo;</button>
        <h2 id="month-title"></h2>
        <button class="ghost" type="button" id="month-next">&rsaquo;</button>
      </div>
      <div class="calendar-grid" id="calendar-grid"></div>
      <div class="card-head">
        <button class="ghost" type="button" id="day-prev">Previous day</button>
        <button class="ghost" type="button" id="day-next">Next day</button>
      </div>
      <p class="subtitle">Selected: <strong id="selected-date"></strong></p>
    </aside>

    <main>
      <nav class="tabs" role="tablist">
        <button class="tab active" type="button" data-tab="today">Today</button>
        <button class="tab" type="button" data-tab="prayer">Prayers</button>
        <button class="tab" type="button" data-tab="exercise">Exercise</button>
        <button class="tab" type="button" data-tab="nutrition">Nutrition</button>
        <button class="tab" type="button" data-tab="study">Study</button>
        <button class="tab" type="button" data-tab="progress">Progress</button>
      </nav>
      <div class="widgets">
        <section class="card" id="w-prayers"></section>
        <section class="card" id="w-tasks"></section>
        <section class="card" id="w-exercises"></section>
        <section class="card" id="w-meals"></section>
        <section class="card" id="w-calculator"></section>
        <section class="card" id="w-words"></section>
        <section class="card" id="w-study"></section>
        <section class="card" id="w-progress"></section>
      </div>
      <div class="status" id="status"></div>
    </main>
  </div>

  <script>
    const RANGE = { start: '{{RANGE_START}}', end: '{{RANGE_END}}' };
    const EXERCISE_TYPES = {{EXERCISE_TYPES}};
    const MEAL_TYPES = {{MEAL_TYPES}};
    const TASK_CATEGORIES = {{TASK_CATEGORIES}};
    const ACTIVITY = ['sedentary', 'light', 'moderate', 'active', 'very_active'];
    const ACTIVITY_MULTIPLIERS = [{{ACTIVITY_MULTIPLIERS}}];
    const MONTHS = ['January', 'February', 'March', 'April', 'May', 'June', 'July',
      'August', 'September', 'October', 'November', 'December'];
    const TABS = {
      today: ['prayers', 'tasks', 'exercises', 'meals', 'words', 'study'],
      prayer: ['prayers'],
      exercise: ['exercises'],
      nutrition: ['meals', 'calculator'],
      study: ['study', 'words'],
      progress: ['progress']
    };

    let selected = '{{DATE}}';
    let view = { year: Number(selected.slice(0, 4)), month: Number(selected.slice(5, 7)) };
    let activeTab = 'today';
    let neighbours = { prev: null, next: null };
    let searchTerm = '';
    const editing = {};

    const statusEl = document.getElementById('status');
    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const esc = (value) => String(value ?? '').replace(/[&<>"']/g, (c) => ({
      '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
    }[c]));

    const api = async (method, path, body) => {
      const res = await fetch(path, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const dayPath = (suffix) => `/api/days/${selected}${suffix}`;

    const inRange = (key) => (!RANGE.start || key >= RANGE.start) && (!RANGE.end || key <= RANGE.end);

    const stat = (label, value) =>
      `<div class="stat"><span class="label">${esc(label)}</span><span class="value">${esc(value)}</span></div>`;

    const field = (f, values) => {
      const value = values[f.name] ?? f.value ?? '';
      if (f.type === 'select') {
        const options = f.options
          .map((o) => `<option value="${esc(o)}" ${o === value ? 'selected' : ''}>${esc(o)}</option>`)
          .join('');
        return `<label>${esc(f.label)}<select name="${f.name}"><option value=""></option>${options}</select></label>`;
      }
      if (f.type === 'checkbox') {
        return `<label>${esc(f.label)}<input type="checkbox" name="${f.name}" ${value ? 'checked' : ''} /></label>`;
      }
      if (f.type === 'textarea') {
        return `<label>${esc(f.label)}<textarea name="${f.name}">${esc(value)}</textarea></label>`;
      }
      const extra = f.type === 'number' ? `min="${f.min ?? 0}" step="${f.step ?? 1}"` : '';
      return `<label>${esc(f.label)}<input type="${f.type}" name="${f.name}" value="${esc(value)}" ${extra} /></label>`;
    };

    const readForm = (form, fields) => {
      const data = {};
      fields.forEach((f) => {
        const input = form.elements[f.name];
        if (f.type === 'checkbox') {
          data[f.name] = input.checked;
        } else if (f.type === 'number') {
          data[f.name] = input.value === '' ? 0 : Number(input.value);
        } else {
          data[f.name] = input.value;
        }
      });
      return data;
    };

    // Exercises, meals, study sessions and tasks share one list widget.
    const LISTS = {
      exercises: {
        title: 'Exercise',
        path: '/exercises',
        items: (s) => s.exercises,
        fields: [
          { name: 'name', label: 'Name', type: 'text' },
          { name: 'type', label: 'Type', type: 'select', options: EXERCISE_TYPES },
          { name: 'sets', label: 'Sets', type: 'number', min: 1, value: 1 },
          { name: 'reps', label: 'Reps', type: 'number', min: 1, value: 1 },
          { name: 'weight', label: 'Weight (kg)', type: 'number', step: 0.5, value: 0 },
          { name: 'time', label: 'Time', type: 'time' },
          { name: 'notes', label: 'Notes', type: 'textarea' }
        ],
        row: (e) => `<div class="title"><strong>${esc(e.name)}</strong> · ${esc(e.type)} · ${esc(e.time)}</div>
          <div class="meta">${e.sets} sets × ${e.reps} reps${e.weight > 0 ? ` × ${e.weight} kg` : ''} ${esc(e.notes || '')}</div>`,
        stats: (s) => stat('Exercises', s.count) + stat('Volume (kg)', s.total_volume.toLocaleString()) +
          stat('Duration', `${s.workout_minutes} min`)
      },
      meals: {
        title: 'Nutrition',
        path: '/meals',
        items: (s) => s.meals,
        fields: [
          { name: 'name', label: 'Name', type: 'text' },
          { name: 'type', label: 'Meal', type: 'select', options: MEAL_TYPES },
          { name: 'time', label: 'Time', type: 'time' },
          { name: 'quantity', label: 'Quantity', type: 'text' },
          { name: 'calories', label: 'Calories', type: 'number' },
          { name: 'carbs', label: 'Carbs (g)', type: 'number', step: 0.1 },
          { name: 'protein', label: 'Protein (g)', type: 'number', step: 0.1 },
          { name: 'fats', label: 'Fats (g)', type: 'number', step: 0.1 },
          { name: 'notes', label: 'Notes', type: 'textarea' }
        ],
        row: (m) => `<div class="title"><strong>${esc(m.name)}</strong> · ${esc(m.type)} · ${esc(m.time)}</div>
          <div class="meta">${esc(m.quantity)} ${m.calories} kcal · C ${m.carbs} · P ${m.protein} · F ${m.fats}</div>`,
        stats: (s) => stat('Calories', s.totals.calories) + stat('Carbs', s.totals.carbs) +
          stat('Protein', s.totals.protein) + stat('Fats', s.totals.fats)
      },
      study: {
        title: 'Study',
        path: '/study',
        items: (s) => s.sessions,
        fields: [
          { name: 'subject', label: 'Subject', type: 'text' },
          { name: 'duration', label: 'Duration (min)', type: 'text' },
          { name: 'pages', label: 'Pages', type: 'number' },
          { name: 'lessons', label: 'Lessons', type: 'number' },
          { name: 'time', label: 'Time', type: 'time' },
          { name: 'notes', label: 'Notes', type: 'textarea' }
        ],
        row: (s) => `<div class="title"><strong>${esc(s.subject)}</strong> · ${esc(s.time)}</div>
          <div class="meta">${esc(s.duration)} min · ${s.pages} pages · ${s.lessons} lessons ${esc(s.notes || '')}</div>`,
        stats: (s) => stat('Minutes', s.totals.minutes) + stat('Pages', s.totals.pages) + stat('Lessons', s.totals.lessons)
      },
      tasks: {
        title: 'Tasks',
        path: '/tasks',
        items: (s) => s.tasks,
        toggle: true,
        fields: [
          { name: 'title', label: 'Title', type: 'text' },
          { name: 'category', label: 'Category', type: 'select', options: TASK_CATEGORIES },
          { name: 'description', label: 'Description', type: 'textarea' },
          { name: 'is_recurring', label: 'Repeat daily', type: 'checkbox' }
        ],
        row: (t) => `<div class="title"><strong>${esc(t.title)}</strong> · ${esc(t.category)}${t.is_recurring ? ' · daily' : ''}</div>
          <div class="meta">${esc(t.description)}</div>`,
        stats: (s) => stat('Done', `${s.stats.completed}/${s.stats.total}`) + stat('Completion', `${s.stats.percentage}%`) +
          Object.entries(s.categories).map(([name, c]) => stat(name, `${c.completed}/${c.total}`)).join('')
      }
    };

    const renderList = async (key) => {
      const cfg = LISTS[key];
      const el = document.getElementById(`w-${key}`);
      const summary = await api('GET', dayPath(cfg.path));
      const items = cfg.items(summary);
      const current = items.find((item) => item.id === editing[key]) || {};
      const rows = items.length
        ? items.map((item) => `<div class="row ${item.is_completed ? 'done' : ''}">
            <div>${cfg.row(item)}</div>
            <div>
              ${cfg.toggle ? `<button class="ghost" data-toggle="${esc(item.id)}">${item.is_completed ? 'Undo' : 'Done'}</button>` : ''}
              <button class="ghost" data-edit="${esc(item.id)}">Edit</button>
              <button class="ghost" data-delete="${esc(item.id)}">Delete</button>
            </div>
          </div>`).join('')
        : '<div class="empty">Nothing recorded for this day</div>';

      el.innerHTML = `
        <div class="card-head"><h2>${cfg.title}</h2></div>
        <div class="stats">${cfg.stats(summary)}</div>
        ${rows}
        <form class="entry">
          ${cfg.fields.map((f) => field(f, current)).join('')}
          <button type="submit">${editing[key] ? 'Update' : 'Add'}</button>
          ${editing[key] ? '<button class="ghost" type="button" data-cancel>Cancel</button>' : ''}
        </form>`;

      const form = el.querySelector('form');
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        const payload = readForm(form, cfg.fields);
        const request = editing[key]
          ? api('PUT', dayPath(`${cfg.path}/${editing[key]}`), payload)
          : api('POST', dayPath(cfg.path), payload);
        request
          .then(() => {
            delete editing[key];
            return refresh();
          })
          .catch((err) => setStatus(err.message, 'error'));
      });
      el.querySelectorAll('[data-edit]').forEach((b) => b.addEventListener('click', () => {
        editing[key] = b.dataset.edit;
        renderList(key).catch((err) => setStatus(err.message, 'error'));
      }));
      el.querySelectorAll('[data-cancel]').forEach((b) => b.addEventListener('click', () => {
        delete editing[key];
        renderList(key).catch((err) => setStatus(err.message, 'error'));
      }));
      el.querySelectorAll('[data-delete]').forEach((b) => b.addEventListener('click', () => {
        api('DELETE', dayPath(`${cfg.path}/${b.dataset.delete}`))
          .then(refresh)
          .catch((err) => setStatus(err.message, 'error'));
      }));
      el.querySelectorAll('[data-toggle]').forEach((b) => b.addEventListener('click', () => {
        api('POST', dayPath(`${cfg.path}/${b.dataset.toggle}/toggle`))
          .then(refresh)
          .catch((err) => setStatus(err.message, 'error'));
      }));
    };

    const renderPrayers = async () => {
      const el = document.getElementById('w-prayers');
      const summary = await api('GET', dayPath('/prayers'));
      const rows = summary.prayers.map((p, index) => {
        const badge = p.status
          ? `<span class="${p.status}">${p.delay === 0 ? 'On time' : `${p.delay} min late`}</span>`
          : '';
        return `<div class="row">
          <div><div class="title"><strong>${esc(p.name)}</strong> · adhan ${esc(p.adhan_time)}</div>${badge}</div>
          <div>
            <input type="time" data-time="${index}" value="${esc(p.prayed_time || '')}" ${p.is_prayed ? '' : 'disabled'} />
            <button class="${p.is_prayed ? '' : 'ghost'}" data-toggle="${index}">${p.is_prayed ? 'Prayed' : 'Not yet'}</button>
          </div>
        </div>`;
      }).join('');
      el.innerHTML = `
        <div class="card-head"><h2>Prayers</h2><span class="big">${summary.completion_percentage}%</span></div>
        ${rows}
        <p class="subtitle">Prayed today: ${summary.completed} of ${summary.total}</p>`;

      el.querySelectorAll('[data-toggle]').forEach((b) => b.addEventListener('click', () => {
        api('POST', dayPath(`/prayers/${b.dataset.toggle}/toggle`))
          .then(refresh)
          .catch((err) => setStatus(err.message, 'error'));
      }));
      el.querySelectorAll('[data-time]').forEach((input) => input.addEventListener('change', () => {
        api('PUT', dayPath(`/prayers/${input.dataset.time}/time`), { time: input.value })
          .then(refresh)
          .catch((err) => setStatus(err.message, 'error'));
      }));
    };

    const WORD_FIELDS = [
      { name: 'term', label: 'Word', type: 'text' },
      { name: 'meaning', label: 'Meaning', type: 'text' },
      { name: 'example', label: 'Example', type: 'textarea' }
    ];

    const renderWords = async () => {
      const el = document.getElementById('w-words');
      const summary = await api('GET', `/api/words?q=${encodeURIComponent(searchTerm)}&date=${selected}`);
      const current = summary.words.find((w) => w.id === editing.words) || {};
      const rows = summary.words.length
        ? summary.words.map((w) => `<div class="row">
            <div><div class="title"><strong>${esc(w.term)}</strong> · ${esc(w.meaning)}</div>
              <div class="meta">${esc(w.example)} ${searchTerm ? `(${w.date})` : ''}</div></div>
            <div>
              <button class="ghost" data-edit="${esc(w.id)}">Edit</button>
              <button class="ghost" data-delete="${esc(w.id)}">Delete</button>
            </div>
          </div>`).join('')
        : '<div class="empty">No words found</div>';
      el.innerHTML = `
        <div class="card-head"><h2>Vocabulary</h2>
          <input type="search" id="word-search" placeholder="Search all words" value="${esc(searchTerm)}" /></div>
        <div class="stats">${stat('Today', summary.today_count)}${stat('All words', summary.total_count)}</div>
        ${rows}
        <form class="entry">
          ${WORD_FIELDS.map((f) => field(f, current)).join('')}
          <button type="submit">${editing.words ? 'Update' : 'Add'}</button>
        </form>`;

      const search = el.querySelector('#word-search');
      search.addEventListener('change', () => {
        searchTerm = search.value;
        renderWords().catch((err) => setStatus(err.message, 'error'));
      });
      const form = el.querySelector('form');
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        const payload = readForm(form, WORD_FIELDS);
        const request = editing.words
          ? api('PUT', `/api/words/${editing.words}`, payload)
          : api('POST', dayPath('/words'), payload);
        request
          .then(() => {
            delete editing.words;
            return refresh();
          })
          .catch((err) => setStatus(err.message, 'error'));
      });
      el.querySelectorAll('[data-edit]').forEach((b) => b.addEventListener('click', () => {
        editing.words = b.dataset.edit;
        renderWords().catch((err) => setStatus(err.message, 'error'));
      }));
      el.querySelectorAll('[data-delete]').forEach((b) => b.addEventListener('click', () => {
        api('DELETE', `/api/words/${b.dataset.delete}`)
          .then(refresh)
          .catch((err) => setStatus(err.message, 'error'));
      }));
    };

    const renderCalculator = async () => {
      const el = document.getElementById('w-calculator');
      const { profile, results } = await api('GET', '/api/profile');
      const activity = ACTIVITY.map((name, i) =>
        `<option value="${name}" ${profile.activity_level === name ? 'selected' : ''}>× ${ACTIVITY_MULTIPLIERS[i]}</option>`
      ).join('');
      el.innerHTML = `
        <div class="card-head"><h2>Calorie calculator</h2></div>
        <form class="entry">
          <label>Weight (kg)<input type="number" name="weight" step="0.1" min="0" value="${profile.weight || ''}" /></label>
          <label>Height (cm)<input type="number" name="height" min="0" value="${profile.height || ''}" /></label>
          <label>Age<input type="number" name="age" min="0" value="${profile.age || ''}" /></label>
          <label>Gender<select name="gender">
            <option value="male" ${profile.gender === 'male' ? 'selected' : ''}>Male</option>
            <option value="female" ${profile.gender === 'female' ? 'selected' : ''}>Female</option>
          </select></label>
          <label>Activity<select name="activity_level"><option value=""></option>${activity}</select></label>
          <button type="submit">Calculate</button>
        </form>
        <div class="stats">${stat('BMR', results.bmr)}${stat('Maintenance', results.tdee)}
          ${stat('Bulking', results.bulking)}${stat('Cutting', results.cutting)}</div>`;

      const form = el.querySelector('form');
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        const f = form.elements;
        api('POST', '/api/calculator', {
          weight: Number(f.weight.value || 0),
          height: Number(f.height.value || 0),
          age: Number(f.age.value || 0),
          gender: f.gender.value,
          activity_level: f.activity_level.value || null
        })
          .then(renderCalculator)
          .catch((err) => setStatus(err.message, 'error'));
      });
    };

    const periodCard = (title, report) => {
      const s = report.stats;
      return `<div class="card">
        <div class="card-head"><h2>${title}</h2><span class="big">${report.percentage}%</span></div>
        <p class="subtitle">${report.start_date} → ${report.end_date}</p>
        <div class="stats">
          ${stat('Prayers', `${s.prayers.completed}/${s.prayers.total} (${report.prayers_percentage}%)`)}
          ${stat('Exercises', s.exercises)}
          ${stat('Meals', s.meals)}
          ${stat('Study', s.study)}
          ${stat('Words', s.words)}
          ${stat('Tasks', `${s.tasks.completed}/${s.tasks.total} (${report.tasks_percentage}%)`)}
        </div>
        <p>${esc(report.message)}</p>
      </div>`;
    };

    const renderProgress = async () => {
      const el = document.getElementById('w-progress');
      const report = await api('GET', dayPath('/progress'));
      el.innerHTML = `<div class="card-head"><h2>Progress</h2></div>
        ${periodCard('This week', report.weekly)}
        ${periodCard('This month', report.monthly)}`;
    };

    const RENDERERS = {
      prayers: renderPrayers,
      tasks: () => renderList('tasks'),
      exercises: () => renderList('exercises'),
      meals: () => renderList('meals'),
      study: () => renderList('study'),
      words: renderWords,
      calculator: renderCalculator,
      progress: renderProgress
    };

    const renderCalendar = async () => {
      const month = await api('GET', `/api/calendar?year=${view.year}&month=${view.month}&selected=${selected}`);
      document.getElementById('month-title').textContent = `${MONTHS[month.month - 1]} ${month.year}`;
      const blanks = '<span></span>'.repeat(month.leading_blanks);
      const heads = ['S', 'M', 'T', 'W', 'T', 'F', 'S'].map((d) => `<strong>${d}</strong>`).join('');
      const days = month.days.map((d) => `<button type="button" data-date="${d.date}"
          class="${d.selected ? 'selected' : ''} ${d.today ? 'today' : ''}" ${d.in_range ? '' : 'disabled'}>${d.day}</button>`).join('');
      const grid = document.getElementById('calendar-grid');
      grid.innerHTML = heads + blanks + days;
      grid.querySelectorAll('[data-date]').forEach((b) => b.addEventListener('click', () => selectDate(b.dataset.date)));
      document.getElementById('month-prev').onclick = () => {
        [view.year, view.month] = month.prev;
        renderCalendar().catch((err) => setStatus(err.message, 'error'));
      };
      document.getElementById('month-next').onclick = () => {
        [view.year, view.month] = month.next;
        renderCalendar().catch((err) => setStatus(err.message, 'error'));
      };
      document.getElementById('selected-date').textContent = selected;
      neighbours = { prev: month.prev_day, next: month.next_day };
      document.getElementById('day-prev').disabled = !neighbours.prev;
      document.getElementById('day-next').disabled = !neighbours.next;
    };

    const renderCountdown = async () => {
      const today = await api('GET', `/api/today?selected=${selected}`);
      const el = document.getElementById('countdown');
      if (today.days_remaining !== null) {
        el.textContent = `Goal: your best self in ${today.days_remaining} days`;
        el.hidden = false;
      }
    };

    const refresh = async () => {
      setStatus('');
      const visible = TABS[activeTab];
      Object.keys(RENDERERS).forEach((key) => {
        document.getElementById(`w-${key}`).hidden = !visible.includes(key);
      });
      await Promise.all([renderCalendar(), renderCountdown(), ...visible.map((key) => RENDERERS[key]())]);
    };

    const selectDate = (key) => {
      if (!inRange(key)) {
        return;
      }
      selected = key;
      view = { year: Number(key.slice(0, 4)), month: Number(key.slice(5, 7)) };
      Object.keys(editing).forEach((k) => delete editing[k]);
      refresh().catch((err) => setStatus(err.message, 'error'));
    };

    document.getElementById('day-prev').addEventListener('click', () => neighbours.prev && selectDate(neighbours.prev));
    document.getElementById('day-next').addEventListener('click', () => neighbours.next && selectDate(neighbours.next));

    document.querySelectorAll('.tab').forEach((button) => {
      button.addEventListener('click', () => {
        activeTab = button.dataset.tab;
        document.querySelectorAll('.tab').forEach((b) => b.classList.toggle('active', b === button));
        refresh().catch((err) => setStatus(err.message, 'error'));
      });
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn placeholders_are_filled() {
        let range = DateRange {
            start: None,
            end: NaiveDate::from_ymd_opt(2025, 10, 31),
        };
        let html = render_index("2025-10-15", &range);
        assert!(!html.contains("{{"));
        assert!(html.contains("let selected = '2025-10-15';"));
        assert!(html.contains("end: '2025-10-31'"));
        assert!(html.contains(r#"["Chest","Back","#));
        assert!(html.contains("1.2,1.375,1.55,1.725,1.9"));
    }
}
