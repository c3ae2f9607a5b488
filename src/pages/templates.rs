//! HTML templates. Each `*Html` struct renders `templates/<kebab-name>.html`.

use std::fmt;

use boilerplate::{Boilerplate, Trusted};

use crate::api::User;
use crate::flash::{Category, Notification};
use crate::pages::form::FormValues;

/// Shared layout: notifications above the page content.
#[derive(Boilerplate)]
pub struct PageHtml<T: PageContent> {
    content: T,
    notifications: Vec<Notification>,
}

impl<T> PageHtml<T>
where
    T: PageContent,
{
    pub fn new(content: T, notifications: Vec<Notification>) -> Self {
        Self {
            content,
            notifications,
        }
    }
}

pub trait PageContent: fmt::Display + 'static {
    fn title(&self) -> String;

    fn page(self, notifications: Vec<Notification>) -> PageHtml<Self>
    where
        Self: Sized,
    {
        PageHtml::new(self, notifications)
    }
}

#[derive(Boilerplate)]
pub struct UsersHtml {
    pub users: Vec<User>,
    pub api_url: String,
}

impl PageContent for UsersHtml {
    fn title(&self) -> String {
        "Users".into()
    }
}

/// Which form is shown, and where it posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn heading(&self) -> String {
        match self {
            FormMode::Create => "Add user".into(),
            FormMode::Edit(id) => format!("Edit user #{id}"),
        }
    }

    pub fn action(&self) -> String {
        match self {
            FormMode::Create => "/add_user".into(),
            FormMode::Edit(id) => format!("/edit_user/{id}"),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Edit(_) => "Save changes",
        }
    }
}

#[derive(Boilerplate)]
pub struct UserFormHtml {
    pub mode: FormMode,
    pub values: FormValues,
}

impl PageContent for UserFormHtml {
    fn title(&self) -> String {
        self.mode.heading()
    }
}

#[derive(Boilerplate)]
pub struct NotFoundHtml;

impl PageContent for NotFoundHtml {
    fn title(&self) -> String {
        "Not found".into()
    }
}

#[derive(Boilerplate)]
pub struct ServerErrorHtml;

impl PageContent for ServerErrorHtml {
    fn title(&self) -> String {
        "Server error".into()
    }
}

pub fn age_text(age: Option<i64>) -> String {
    age.map(|age| age.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: 1,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            age: Some(30),
        }
    }

    #[test]
    fn test_users_in_order_and_escaped() {
        let html = UsersHtml {
            users: vec![
                alice(),
                User {
                    id: 2,
                    name: "<script>alert(1)</script>".into(),
                    email: "mallory@example.com".into(),
                    age: None,
                },
            ],
            api_url: "http://api:5000".into(),
        }
        .page(Vec::new())
        .to_string();

        let alice_at = html.find("alice@example.com").unwrap();
        let mallory_at = html.find("mallory@example.com").unwrap();
        assert!(alice_at < mallory_at);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("/edit_user/2"));
        assert!(html.contains("api:5000"));
    }

    #[test]
    fn test_empty_list_message() {
        let html = UsersHtml {
            users: Vec::new(),
            api_url: String::new(),
        }
        .to_string();
        assert!(html.contains("No users found"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_notifications_rendered_with_category() {
        let html = NotFoundHtml
            .page(vec![
                Notification::new(Category::Success, "User deleted successfully! 🗑️"),
                Notification::new(Category::Error, "email already exists"),
            ])
            .to_string();

        assert!(html.contains("flash-success"));
        assert!(html.contains("User deleted successfully! 🗑️"));
        assert!(html.contains("flash-error"));
        assert!(html.contains("email already exists"));
        assert!(html.contains("<title>Not found · User Management</title>"));
    }

    #[test]
    fn test_edit_form_prefilled() {
        let html = UserFormHtml {
            mode: FormMode::Edit(7),
            values: FormValues::from(&alice()),
        }
        .to_string();

        assert!(html.contains(r#"action="/edit_user/7""#));
        assert!(html.contains(r#"value="Alice""#));
        assert!(html.contains(r#"value="30""#));
        assert!(html.contains("Save changes"));
    }

    #[test]
    fn test_age_text() {
        assert_eq!(age_text(Some(41)), "41");
        assert_eq!(age_text(None), "");
    }
}
