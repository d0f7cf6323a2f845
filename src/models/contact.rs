#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn render_body(&self) -> String {
        format!(
            "You have received a new form submission:\n\n\
             Name: {}\n\
             Email: {}\n\
             Contact Number: {}\n\
             Message: {}\n",
            self.name, self.email, self.phone, self.message
        )
    }
}
