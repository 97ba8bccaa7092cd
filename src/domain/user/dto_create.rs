use super::Role;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}
