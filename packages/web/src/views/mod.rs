mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::Dashboard;

use api::Redirect;

use crate::Route;

/// Route for a session operation's redirect.
pub(crate) fn route_for(redirect: Redirect) -> Route {
    match redirect {
        Redirect::Dashboard => Route::Dashboard {},
        Redirect::Home => Route::Home {},
    }
}
