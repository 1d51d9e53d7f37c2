use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfilePictureResponse {
    pub teacher_id: i32,
    /// Path relative to the media root, or null when removed
    #[schema(example = "profile_pictures/1b4e28ba-2fa1-11d2-883f-0016d3cca427_me.jpg")]
    pub profile_picture: Option<String>,
}
