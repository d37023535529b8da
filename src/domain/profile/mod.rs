mod update;
mod view;

pub use update::{
    ProfilePayload, UpdateProfileCommand, update_profile, update_profile_endpoint,
};
pub use view::{ProfileView, profile_endpoint, profile_for_user};
