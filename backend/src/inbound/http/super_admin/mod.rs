//! Super-admin surface: staff login, staff account CRUD, and the profile.

pub mod admins;
pub mod auth;
pub mod profile;

use actix_web::web;

/// The `/super-admin` scope.
pub fn scope() -> actix_web::Scope {
    web::scope("/super-admin")
        .service(auth::login)
        .service(admins::add_admin)
        .service(admins::list_admins)
        .service(admins::update_admin)
        .service(admins::delete_admin)
        .service(profile::get_profile)
        .service(profile::update_profile)
}
