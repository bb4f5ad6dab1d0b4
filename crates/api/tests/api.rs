
mod handlers {
    mod config_test;
    mod middleware_test;
    mod order_test;
    mod ownership_test;
    mod routes_test;
}
