/// The one account allowed to log in.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
    pub fn check(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
