use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "TRABAJADOR")]
    Worker,
    #[serde(rename = "VOLUNTARIO")]
    Volunteer,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Worker => "Trabajador",
            Role::Volunteer => "Voluntario",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "rol")]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}
