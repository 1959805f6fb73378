//! Planning page.

use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::state::AppState;

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 20px; background: #f5f5f5; }
        h1, h2 { color: #333; }
        section { background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); padding: 16px; margin-bottom: 20px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { padding: 8px 12px; text-align: left; border-bottom: 1px solid #eee; }
        th { background: #f8f9fa; font-weight: 600; color: #555; }
        small { color: #888; }
        pre { background: #f8f9fa; padding: 12px; overflow-x: auto; }
"#;

const SCRIPT: &str = r#"
    async function postJson(url, body) {
        const res = await fetch(url, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body),
        });
        return res.json();
    }

    function session() {
        return {
            date: document.getElementById('date').value,
            shift: document.getElementById('shift').value,
        };
    }

    function show(id, out) {
        document.getElementById(id).textContent = JSON.stringify(out, null, 2);
    }

    function addRow(tbodyId, templateId) {
        const row = document.getElementById(templateId).content.firstElementChild.cloneNode(true);
        document.getElementById(tbodyId).appendChild(row);
    }

    function removeRow(button) {
        button.closest('tr').remove();
    }

    function rows(tbodyId) {
        return Array.from(document.querySelectorAll('#' + tbodyId + ' tr')).map(tr => {
            const row = {};
            tr.querySelectorAll('[data-field]').forEach(el => { row[el.dataset.field] = el.value; });
            return row;
        });
    }

    async function markAttendance() {
        const body = session();
        document.querySelectorAll('input[data-emp]').forEach(cb => {
            body[cb.dataset.emp] = cb.checked;
        });
        show('attendance-result', await postJson('/mark_attendance', body));
    }

    async function planProduction() {
        const body = session();
        body.parts = rows('plan-rows');
        const out = await postJson('/plan_production', body);
        show('plan-result', out);

        const actuals = document.getElementById('actual-rows');
        actuals.innerHTML = '';
        (out.assignments || []).forEach(a => {
            const tr = document.createElement('tr');
            tr.dataset.part = a.part_id;
            tr.dataset.area = a.work_area;
            tr.dataset.plan = a.quantity;
            tr.innerHTML = '<td></td><td></td><td></td>'
                + '<td><input type="number" min="0" onchange="updateActual(this)"></td><td class="eff"></td>';
            tr.children[0].textContent = a.part + ' (' + a.part_id + ')';
            tr.children[1].textContent = a.work_area;
            tr.children[2].textContent = a.quantity;
            actuals.appendChild(tr);
        });
    }

    async function updateActual(input) {
        const tr = input.closest('tr');
        const body = session();
        body.part_id = tr.dataset.part;
        body.work_area = tr.dataset.area;
        body.plan = tr.dataset.plan;
        body.actual = input.value;
        const out = await postJson('/update_production_actual', body);
        tr.querySelector('.eff').textContent =
            out.status === 'updated' ? out.efficiency.toFixed(1) + '%' : out.status || out.error;
    }

    async function saveMaterial() {
        const body = { date: session().date, materials: rows('material-rows') };
        show('material-result', await postJson('/save_material', body));
    }

    document.getElementById('date').valueAsDate = new Date();
    addRow('plan-rows', 'plan-row');
    addRow('material-rows', 'material-row');
"#;

/// Render the planning page: attendance sheet, plan form and roster.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut employee_rows = String::new();
    for employee in &state.roster.employees {
        employee_rows.push_str(&format!(
            r#"<tr>
                <td><input type="checkbox" data-emp="{id}"></td>
                <td>{id}</td>
                <td>{name}</td>
                <td>{efficiency}</td>
                <td><small>{skills}</small></td>
            </tr>"#,
            id = escape_html(employee.id.as_str()),
            name = escape_html(&employee.name),
            efficiency = employee.efficiency,
            skills = escape_html(&employee.skills().collect::<Vec<_>>().join(", ")),
        ));
    }
    if employee_rows.is_empty() {
        employee_rows =
            r#"<tr><td colspan="5" style="text-align:center;color:#666;">No employees on roster</td></tr>"#
                .to_string();
    }

    let part_options: String = state
        .roster
        .parts
        .iter()
        .map(|p| {
            format!(
                r#"<option value="{}">{} ({})</option>"#,
                escape_html(p.id.as_str()),
                escape_html(&p.name),
                escape_html(p.id.as_str())
            )
        })
        .collect();

    let area_options: String = state
        .standard_times
        .work_areas()
        .iter()
        .map(|a| format!(r#"<option value="{0}">{0}</option>"#, escape_html(a)))
        .collect();

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Shopfloor</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>{style}</style>
</head>
<body>
    <h1>Shopfloor</h1>
    <p>
        Date <input type="date" id="date">
        Shift <input type="text" id="shift" value="A" size="6">
    </p>
    <section>
        <h2>Attendance</h2>
        <table>
            <thead>
                <tr><th>Present</th><th>ID</th><th>Name</th><th>Efficiency</th><th>Trained</th></tr>
            </thead>
            <tbody>
                {employee_rows}
            </tbody>
        </table>
        <p><button onclick="markAttendance()">Save attendance</button></p>
        <pre id="attendance-result"></pre>
    </section>
    <section>
        <h2>Production plan</h2>
        <table>
            <thead>
                <tr><th>Part</th><th>Quantity</th><th>Work area</th><th></th></tr>
            </thead>
            <tbody id="plan-rows"></tbody>
        </table>
        <template id="plan-row">
            <tr>
                <td><select data-field="part_id">{part_options}</select></td>
                <td><input type="number" data-field="quantity" value="1" min="0"></td>
                <td><select data-field="work_area">{area_options}</select></td>
                <td><button onclick="removeRow(this)">Remove</button></td>
            </tr>
        </template>
        <p>
            <button onclick="addRow('plan-rows', 'plan-row')">Add part</button>
            <button onclick="planProduction()">Plan</button>
        </p>
        <pre id="plan-result"></pre>
    </section>
    <section>
        <h2>Actual quantity</h2>
        <table>
            <thead>
                <tr><th>Part</th><th>Work area</th><th>Plan</th><th>Actual</th><th>Efficiency</th></tr>
            </thead>
            <tbody id="actual-rows"></tbody>
        </table>
    </section>
    <section>
        <h2>Material</h2>
        <table>
            <thead>
                <tr><th>Program</th><th>Part</th><th>Work area</th><th>Qty</th><th>Required</th><th>Actual</th><th>Efficiency</th><th></th></tr>
            </thead>
            <tbody id="material-rows"></tbody>
        </table>
        <template id="material-row">
            <tr>
                <td><input type="text" data-field="program" size="8"></td>
                <td><select data-field="part_id">{part_options}</select></td>
                <td><select data-field="work_area">{area_options}</select></td>
                <td><input type="number" data-field="qty" value="0" min="0"></td>
                <td><input type="number" data-field="req" value="0" min="0" step="any"></td>
                <td><input type="number" data-field="actual" value="0" min="0" step="any"></td>
                <td><input type="text" data-field="efficiency" value="0%" size="6"></td>
                <td><button onclick="removeRow(this)">Remove</button></td>
            </tr>
        </template>
        <p>
            <button onclick="addRow('material-rows', 'material-row')">Add line</button>
            <button onclick="saveMaterial()">Save material</button>
        </p>
        <pre id="material-result"></pre>
    </section>
    <p style="margin-top:20px;color:#888;font-size:12px;">
        Dashboard: <a href="/get_dashboard_data">/get_dashboard_data</a> |
        Health: <a href="/health">/health</a>
    </p>
    <script>{script}</script>
</body>
</html>"#,
        style = STYLE,
        employee_rows = employee_rows,
        part_options = part_options,
        area_options = area_options,
        script = SCRIPT,
    );

    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape_html("O'Neil"), "O&#39;Neil");
    }
}
