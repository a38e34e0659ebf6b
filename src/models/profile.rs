use serde::Serialize;

/// Body for `PUT /profile/update/`. Empty password fields mean "keep the current password".
#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}
