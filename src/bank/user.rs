/// The identity of the logged in account holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// The email used to log in.
    pub email: String,
    /// The account holder's first name.
    pub first_name: String,
    /// The account holder's last name.
    pub last_name: String,
}

impl User {
    /// The first and last name separated by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The first letter of the first name, or "U" if the first name is empty.
    pub fn initial(&self) -> char {
        self.first_name.chars().next().unwrap_or('U')
    }
}
