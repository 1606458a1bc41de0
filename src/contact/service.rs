//! # Contact Service

use tracing::info;

use super::errors::{ContactError, ContactResult};
use super::message::{ContactMessage, MessageDate, MessageRepository};

/// Raw contact form input
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Contact form handling and the message inbox
pub struct ContactService<R: MessageRepository> {
    repository: R,
}

impl<R: MessageRepository> ContactService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Validate and store a message stamped with the current time.
    ///
    /// Name, email and message are required; subject may be blank.
    pub fn submit(&self, form: ContactForm) -> ContactResult<ContactMessage> {
        if form.name.is_empty() || form.email.is_empty() || form.message.is_empty() {
            return Err(ContactError::MissingFields);
        }

        let message = ContactMessage {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            date: MessageDate::now(),
        };
        self.repository.append(message.clone())?;
        info!(from = %message.email, "contact message stored");
        Ok(message)
    }

    /// Every message, newest first. Messages with an unreadable date
    /// follow, in arrival order.
    pub fn list_newest_first(&self) -> ContactResult<Vec<ContactMessage>> {
        let mut messages = self.repository.list()?;
        messages.sort_by(|a, b| MessageDate::newest_first(&a.date, &b.date));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::message::InMemoryMessageRepository;
    use chrono::{Duration, TimeZone, Utc};

    fn form() -> ContactForm {
        ContactForm {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            subject: "".into(),
            message: "Hi".into(),
        }
    }

    #[test]
    fn test_submit_requires_name_email_message() {
        let service = ContactService::new(InMemoryMessageRepository::new());
        for broken in [
            ContactForm { name: "".into(), ..form() },
            ContactForm { email: "".into(), ..form() },
            ContactForm { message: "".into(), ..form() },
        ] {
            assert!(matches!(service.submit(broken), Err(ContactError::MissingFields)));
        }
        assert!(service.list_newest_first().unwrap().is_empty());
    }

    #[test]
    fn test_submit_without_subject() {
        let service = ContactService::new(InMemoryMessageRepository::new());
        let stored = service.submit(form()).unwrap();
        assert_eq!(stored.subject, "");
        assert_eq!(service.list_newest_first().unwrap().len(), 1);
    }

    #[test]
    fn test_list_newest_first() {
        let repo = InMemoryMessageRepository::new();
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        for (name, days) in [("old", 0), ("newest", 10), ("middle", 5)] {
            repo.append(ContactMessage {
                name: name.into(),
                email: "e".into(),
                subject: "".into(),
                message: "m".into(),
                date: (base + Duration::days(days)).into(),
            })
            .unwrap();
        }

        let service = ContactService::new(repo);
        let names: Vec<_> = service
            .list_newest_first()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["newest", "middle", "old"]);
    }

    #[test]
    fn test_legacy_dates_sort_after_parsed_in_arrival_order() {
        let repo = InMemoryMessageRepository::new();
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let entries = [
            ("legacy-a", MessageDate::Legacy("1/2/2024, 9:00:00 AM".into())),
            ("parsed-old", base.into()),
            ("legacy-b", MessageDate::Legacy("garbage".into())),
            ("parsed-new", (base + Duration::days(3)).into()),
        ];
        for (name, date) in entries {
            repo.append(ContactMessage {
                name: name.into(),
                email: "e".into(),
                subject: "".into(),
                message: "m".into(),
                date,
            })
            .unwrap();
        }

        let service = ContactService::new(repo);
        service.submit(form()).unwrap();

        let names: Vec<_> = service
            .list_newest_first()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Ann", "parsed-new", "parsed-old", "legacy-a", "legacy-b"]);
    }
}
