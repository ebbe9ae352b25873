use common::model::auth::User;
use common::route::Route;
use yew::Callback;

use crate::api::ApiClient;
use crate::store::UploadedDataStore;

/// What every page receives from the root component.
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub api: ApiClient,
    pub uploads: UploadedDataStore,
    /// `None` until the session is authenticated.
    pub user: Option<User>,
    pub navigate: Callback<Route>,
    pub on_signed_in: Callback<User>,
    pub on_sign_out: Callback<()>,
}

impl AppContext {
    pub fn go(&self, route: Route) {
        self.navigate.emit(route);
    }
}
