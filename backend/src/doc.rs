//! OpenAPI documentation configuration.
//!
//! Generates the specification for the REST surface: every role-scoped
//! endpoint, the shared error envelope, and the bearer security scheme.
//! Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus helpdesk backend API",
        description = "Admin/student portal with a FAQ chatbot and an escalation queue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::admin::dashboard::get_dashboard,
        crate::inbound::http::admin::faqs::add_faq,
        crate::inbound::http::admin::faqs::list_faqs,
        crate::inbound::http::admin::faqs::update_faq,
        crate::inbound::http::admin::faqs::delete_faq,
        crate::inbound::http::admin::news::add_news,
        crate::inbound::http::admin::news::list_news,
        crate::inbound::http::admin::news::update_news,
        crate::inbound::http::admin::news::delete_news,
        crate::inbound::http::admin::students::add_student,
        crate::inbound::http::admin::students::list_students,
        crate::inbound::http::admin::students::update_student,
        crate::inbound::http::admin::students::delete_student,
        crate::inbound::http::admin::unsolved::list_unsolved,
        crate::inbound::http::admin::unsolved::update_unsolved,
        crate::inbound::http::student::auth::login,
        crate::inbound::http::student::chat::send_chat,
        crate::inbound::http::student::chat::chat_history,
        crate::inbound::http::student::home::home,
        crate::inbound::http::student::news::list_news,
        crate::inbound::http::super_admin::auth::login,
        crate::inbound::http::super_admin::admins::add_admin,
        crate::inbound::http::super_admin::admins::list_admins,
        crate::inbound::http::super_admin::admins::update_admin,
        crate::inbound::http::super_admin::admins::delete_admin,
        crate::inbound::http::super_admin::profile::get_profile,
        crate::inbound::http::super_admin::profile::update_profile,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    tags(
        (name = "admin", description = "Dashboard, FAQ/news/student CRUD, review queue"),
        (name = "student", description = "Login, chatbot, home screen, news feed"),
        (name = "super-admin", description = "Staff login, staff accounts, profile"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Sanity checks over the generated document.
    use super::*;
    use utoipa::OpenApi as _;

    #[test]
    fn document_includes_every_role_prefix() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.starts_with("/admin/")));
        assert!(paths.iter().any(|p| p.starts_with("/student/")));
        assert!(paths.iter().any(|p| p.starts_with("/super-admin/")));
        assert!(paths.iter().any(|p| p.starts_with("/health/")));
    }

    #[test]
    fn escalation_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/admin/unsolved/{id}"));
    }
}
