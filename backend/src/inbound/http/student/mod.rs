//! Student surface: login, chatbot, home screen, and the news feed.

pub mod auth;
pub mod chat;
pub mod home;
pub mod news;

use actix_web::web;

/// The `/student` scope.
pub fn scope() -> actix_web::Scope {
    web::scope("/student")
        .service(auth::login)
        .service(chat::send_chat)
        .service(chat::chat_history)
        .service(home::home)
        .service(news::list_news)
}
