use actix_web::{http::header, HttpResponse, Responder};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

pub async fn root_redirect() -> impl Responder {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/static/index.html"))
        .finish()
}

pub async fn index_html() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};

    use crate::routes::routes::frontend_configure;

    #[actix_web::test]
    async fn serves_the_page_and_redirects_root() {
        let app = test::init_service(App::new().configure(frontend_configure)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let req = test::TestRequest::get().uri("/static/index.html").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let page = std::str::from_utf8(&body).unwrap();
        assert!(page.contains("/api/tasks/analyze/"));
    }
}
