//! Server-rendered HTML views
//!
//! Every interpolated value goes through [`escape`].

use std::fmt::Write;

use axum::http::StatusCode;

use crate::auth::SessionUser;
use crate::contact::ContactMessage;
use crate::students::SchoolTables;
use crate::table::Table;

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode a value used as one URL path segment
pub fn encode_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{:02X}", b);
        }
    }
    out
}

fn nav(user: Option<&SessionUser>) -> String {
    let mut links = vec![
        ("/", "Home"),
        ("/database", "Database"),
        ("/contact", "Contact"),
        ("/crud", "CRUD"),
    ];
    match user {
        Some(u) => {
            links.push(("/messages", "Messages"));
            links.push(("/dashboard", "Dashboard"));
            if u.is_admin() {
                links.push(("/admin", "Admin"));
            }
            links.push(("/logout", "Logout"));
        }
        None => {
            links.push(("/login", "Login"));
            links.push(("/register", "Register"));
        }
    }

    let mut html = String::from("<nav><ul>");
    for (href, label) in links {
        let _ = write!(html, r#"<li><a href="{href}">{label}</a></li>"#);
    }
    html.push_str("</ul>");
    if let Some(u) = user {
        let _ = write!(
            html,
            r#"<p class="who">Signed in as <strong>{}</strong> ({})</p>"#,
            escape(&u.username),
            u.role
        );
    }
    html.push_str("</nav>");
    html
}

fn layout(title: &str, user: Option<&SessionUser>, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Classboard</title>\n\
         <link rel=\"stylesheet\" href=\"/public/style.css\">\n</head>\n<body>\n{nav}\n\
         <main>\n<h1>{title}</h1>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
        nav = nav(user),
        body = body,
    )
}

fn flash(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="message">{}</p>"#, escape(message))
    }
}

pub fn landing(user: Option<&SessionUser>) -> String {
    layout(
        "Welcome",
        user,
        "<p>Student records, subjects and marks in one place. \
         Register or log in to read messages from the contact form.</p>",
    )
}

fn credentials_form(action: &str, button: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">{button}</button>
</form>"#
    )
}

pub fn register_page(user: Option<&SessionUser>, message: &str) -> String {
    let body = format!("{}{}", flash(message), credentials_form("/register", "Register"));
    layout("Register", user, &body)
}

pub fn login_page(user: Option<&SessionUser>, message: &str) -> String {
    let body = format!("{}{}", flash(message), credentials_form("/login", "Login"));
    layout("Login", user, &body)
}

pub fn dashboard(user: &SessionUser) -> String {
    let body = format!(
        "<p>Hello, {}. Your role is <em>{}</em>.</p>",
        escape(&user.username),
        user.role
    );
    layout("Dashboard", Some(user), &body)
}

pub fn admin_page(user: &SessionUser) -> String {
    let body = format!(
        "<p>Administrator area for {}.</p>",
        escape(&user.username)
    );
    layout("Admin", Some(user), &body)
}

/// Bare forbidden page
pub fn access_denied(message: &str) -> String {
    format!("<h2>Access denied. {}</h2>", escape(message))
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(
        &format!("Error {}", status.as_u16()),
        None,
        &format!("<p>{}</p>", escape(message)),
    )
}

fn table_html(table: &Table) -> String {
    if !table.has_headers() {
        return "<p>No data.</p>".to_string();
    }

    let mut html = String::from("<table>\n<thead><tr>");
    for header in table.headers() {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in table.rows() {
        html.push_str("<tr>");
        for value in row.values() {
            let _ = write!(html, "<td>{}</td>", escape(value));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

pub fn database_page(user: Option<&SessionUser>, tables: &SchoolTables) -> String {
    let body = format!(
        "<h2>Students</h2>\n{}\n<h2>Subjects</h2>\n{}\n<h2>Marks</h2>\n{}",
        table_html(&tables.students),
        table_html(&tables.subjects),
        table_html(&tables.marks),
    );
    layout("Database", user, &body)
}

pub fn contact_page(user: Option<&SessionUser>, message: &str) -> String {
    let body = format!(
        r#"{}<form method="post" action="/contact">
<label>Name <input name="name" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Subject <input name="subject"></label>
<label>Message <textarea name="message" required></textarea></label>
<button type="submit">Send</button>
</form>"#,
        flash(message)
    );
    layout("Contact", user, &body)
}

pub fn messages_page(user: &SessionUser, messages: &[ContactMessage]) -> String {
    let mut body = String::new();
    if messages.is_empty() {
        body.push_str("<p>No messages yet.</p>");
    }
    for m in messages {
        let _ = write!(
            body,
            r#"<article class="msg">
<h3>{subject}</h3>
<p class="meta">{name} &lt;{email}&gt; &middot; {date}</p>
<p>{message}</p>
</article>
"#,
            subject = escape(if m.subject.is_empty() { "(no subject)" } else { m.subject.as_str() }),
            name = escape(&m.name),
            email = escape(&m.email),
            date = escape(&m.date.to_string()),
            message = escape(&m.message),
        );
    }
    layout("Messages", Some(user), &body)
}

fn student_inputs(name: &str, class: &str, sex: &str) -> String {
    format!(
        r#"<input name="name" value="{}" placeholder="Name"> <input name="class" value="{}" placeholder="Class"> <input name="sex" value="{}" placeholder="Sex">"#,
        escape(name),
        escape(class),
        escape(sex)
    )
}

pub fn crud_page(user: Option<&SessionUser>, students: &Table) -> String {
    let mut body = String::from("<table>\n<thead><tr><th>id</th><th>Student</th><th></th></tr></thead>\n<tbody>\n");
    for row in students.rows() {
        let id = row.get("id").unwrap_or_default();
        let _ = write!(
            body,
            r#"<tr><td>{id_text}</td><td><form method="post" action="/crud/update/{id_url}">{inputs} <button type="submit">Save</button></form></td><td><a href="/crud/delete/{id_url}">Delete</a></td></tr>
"#,
            id_text = escape(id),
            id_url = escape(&encode_segment(id)),
            inputs = student_inputs(
                row.get("name").unwrap_or_default(),
                row.get("class").unwrap_or_default(),
                row.get("sex").unwrap_or_default(),
            ),
        );
    }
    body.push_str("</tbody>\n</table>\n<h2>Add student</h2>\n");
    let _ = write!(
        body,
        r#"<form method="post" action="/crud/add">{} <button type="submit">Add</button></form>"#,
        student_inputs("", "", "")
    );
    layout("Students", user, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::table::Record;

    fn admin() -> SessionUser {
        SessionUser {
            username: "root<script>".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("12"), "12");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn test_nav_depends_on_user() {
        let anon = landing(None);
        assert!(anon.contains(r#"href="/login""#));
        assert!(!anon.contains(r#"href="/admin""#));

        let html = landing(Some(&admin()));
        assert!(html.contains(r#"href="/admin""#));
        assert!(html.contains("root&lt;script&gt;"));
        assert!(!html.contains("root<script>"));
    }

    #[test]
    fn test_crud_page_lists_rows() {
        let mut table = Table::new(["id", "name", "class", "sex"]);
        table.append(Record::from_pairs([("id", "1"), ("name", "Jane"), ("class", "10A"), ("sex", "F")]));
        let html = crud_page(None, &table);
        assert!(html.contains(r#"action="/crud/update/1""#));
        assert!(html.contains(r#"href="/crud/delete/1""#));
        assert!(html.contains(r#"value="Jane""#));
    }

    #[test]
    fn test_empty_table_renders_placeholder() {
        let html = database_page(None, &SchoolTables::default());
        assert_eq!(html.matches("No data.").count(), 3);
    }

    #[test]
    fn test_flash_message_escaped() {
        let html = login_page(None, "Invalid <b>");
        assert!(html.contains("Invalid &lt;b&gt;"));
    }
}
