use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

/// The "Get In Touch" form. Sending is simulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Returns what was "sent" and leaves every field empty.
    pub fn submit(&mut self) -> ContactForm {
        let sent = std::mem::take(self);
        info!(
            email = %sent.email,
            subject = %sent.subject,
            "contact message sent (simulated)"
        );
        sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_resets_all_fields() {
        let mut form = ContactForm::default();
        form.set(ContactField::Name, "Ada");
        form.set(ContactField::Email, "ada@example.com");
        form.set(ContactField::Subject, "API access");
        form.set(ContactField::Message, "Do you have one?");

        let sent = form.submit();
        assert_eq!(sent.subject, "API access");
        assert_eq!(form, ContactForm::default());
        assert!(form.name.is_empty() && form.email.is_empty());
        assert!(form.subject.is_empty() && form.message.is_empty());
    }

    #[test]
    fn submit_resets_even_partial_or_empty_forms() {
        let mut form = ContactForm::default();
        form.submit();
        assert_eq!(form, ContactForm::default());

        form.set(ContactField::Message, "only a message");
        form.submit();
        assert_eq!(form, ContactForm::default());
    }
}
