use super::EmailMessage;

const SUCCESS_SUBJECT: &str = "Assignment Download and Upload Successful";
const FAILURE_SUBJECT: &str = "Assignment Download Failed";
const EMPTY_SUBJECT: &str = "Assignment Submission Empty";

/// Plain-text notification templates, signed with a fixed signature.
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    signature: String,
}

impl EmailTemplates {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
        }
    }

    pub fn success(&self, name: &str) -> EmailMessage {
        self.render(
            SUCCESS_SUBJECT,
            name,
            "The Assignment has been successfully downloaded and uploaded to the storage bucket.",
        )
    }

    pub fn failure(&self, name: &str) -> EmailMessage {
        self.render(
            FAILURE_SUBJECT,
            name,
            "There was an error downloading your assignment, please resubmit it.",
        )
    }

    pub fn empty_archive(&self, name: &str) -> EmailMessage {
        self.render(
            EMPTY_SUBJECT,
            name,
            "The assignment you submitted is empty. Please check the archive contents and resubmit it.",
        )
    }

    fn render(&self, subject: &str, name: &str, line: &str) -> EmailMessage {
        EmailMessage {
            subject: subject.to_string(),
            body: format!(
                "Hello {},\n\n{}\n\nBest Regards,\n{}",
                name, line, self.signature
            ),
        }
    }
}
