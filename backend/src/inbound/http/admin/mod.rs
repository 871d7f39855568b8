//! Admin surface: dashboard, FAQ/news/student CRUD, and the review queue.
//!
//! These routes carry no token guard; only the super-admin surface is
//! authenticated.

pub mod dashboard;
pub mod faqs;
pub mod news;
pub mod students;
pub mod unsolved;

use actix_web::web;

/// The `/admin` scope.
pub fn scope() -> actix_web::Scope {
    web::scope("/admin")
        .service(dashboard::get_dashboard)
        .service(faqs::add_faq)
        .service(faqs::list_faqs)
        .service(faqs::update_faq)
        .service(faqs::delete_faq)
        .service(news::add_news)
        .service(news::list_news)
        .service(news::update_news)
        .service(news::delete_news)
        .service(students::add_student)
        .service(students::list_students)
        .service(students::update_student)
        .service(students::delete_student)
        .service(unsolved::list_unsolved)
        .service(unsolved::update_unsolved)
}
