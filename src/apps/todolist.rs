use crate::{
    error::RouteError,
    router::{RouteMeta, RouteTable},
};

/// To-do list front end. Every route is public and no guard is installed.
pub fn routes() -> Result<RouteTable, RouteError> {
    RouteTable::from_routes([
        ("/", Some("coffe"), "CoffeView", RouteMeta::PUBLIC),
        ("/todo", Some("todo"), "TodoView", RouteMeta::PUBLIC),
        ("/about", Some("about"), "AboutView", RouteMeta::PUBLIC),
        ("/person", Some("person"), "PersonView", RouteMeta::PUBLIC),
        ("/rate", Some("rate"), "RateView", RouteMeta::PUBLIC),
    ])
}
