use crate::{
    error::RouteError,
    router::{RouteMeta, RouteTable},
};

/// Coffee shop front end. The only table with access requirements, and the only
/// app that installs a navigation guard.
pub fn routes() -> Result<RouteTable, RouteError> {
    RouteTable::from_routes([
        ("/", Some("coffe"), "CoffeView", RouteMeta::PUBLIC),
        ("/about", Some("about"), "AboutView", RouteMeta::PUBLIC),
        ("/person/:personId", Some("person"), "PersonView", RouteMeta::PUBLIC),
        ("/rate", Some("rate"), "RateView", RouteMeta::PUBLIC),
        ("/todo", Some("todo"), "TodoView", RouteMeta::AUTH),
        ("/login", Some("login"), "LoginView", RouteMeta::PUBLIC),
        ("/register", Some("register"), "RegisterView", RouteMeta::PUBLIC),
        ("/profile", Some("profile"), "ProfileView", RouteMeta::AUTH),
        ("/products", Some("products"), "ProductsView", RouteMeta::PUBLIC),
        ("/cart", None, "CartView", RouteMeta::AUTH),
        ("/admin/products", None, "AdminProducts", RouteMeta::ADMIN),
        ("/admin/reviews", None, "AdminReviews", RouteMeta::ADMIN),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Access;

    #[test]
    fn table_shape() {
        let table = routes().unwrap();
        assert_eq!(table.len(), 12);
        assert_eq!(table.iter().filter(|r| r.name.is_none()).count(), 3);
        assert!(table.iter().all(|r| !r.meta.is_inconsistent()));
    }

    #[test]
    fn access_levels() {
        let table = routes().unwrap();
        let access = |path: &str| table.resolve(path).unwrap().meta().access();
        assert_eq!(access("/about"), Access::Public);
        assert_eq!(access("/person/3"), Access::Public);
        assert_eq!(access("/cart"), Access::AuthRequired);
        assert_eq!(access("/profile"), Access::AuthRequired);
        assert_eq!(access("/admin/reviews"), Access::AdminRequired);
        assert!(table.resolve("/admin").is_none());
    }
}
