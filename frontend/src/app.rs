//! Root component: owns the session, the API client and the uploaded-data
//! store, follows the browser location and applies the route guards.

use common::model::auth::User;
use common::route::{resolve, Resolution, Route};
use gloo_events::EventListener;
use log::{debug, info};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::navbar::Navbar;
use crate::components::spinner::Spinner;
use crate::components::toast::show_toast;
use crate::config;
use crate::context::AppContext;
use crate::helpers::{confirm, set_window_dirty_flag, window_is_dirty};
use crate::pages::dashboard::DashboardPage;
use crate::pages::data_upload::DataUploadPage;
use crate::pages::designer::DesignerPage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::pages::template_upload::TemplateUploadPage;
use crate::router;
use crate::session::{self, SessionState};
use crate::store::UploadedDataStore;

pub enum Msg {
    SessionReady(SessionState),
    /// Back/forward navigation.
    LocationChanged,
    Navigate(Route),
    SignedIn(User),
    SignOut,
    /// A request answered 401; credentials are already cleared.
    Unauthorized,
}

pub struct App {
    session: SessionState,
    route: Option<Route>,
    api: ApiClient,
    uploads: UploadedDataStore,
    _popstate: Option<EventListener>,
}

impl App {
    /// Replaces the location when the guards send the visitor elsewhere.
    fn apply_guards(&mut self) {
        if let Resolution::Redirect(target) = resolve(self.route.clone(), self.session.phase()) {
            debug!("redirecting to {}", target.to_path());
            router::replace(&target);
            self.route = Some(target);
        }
    }

    fn context(&self, ctx: &Context<Self>) -> AppContext {
        let link = ctx.link();
        AppContext {
            api: self.api.clone(),
            uploads: self.uploads.clone(),
            user: self.session.user().cloned(),
            navigate: link.callback(Msg::Navigate),
            on_signed_in: link.callback(Msg::SignedIn),
            on_sign_out: link.callback(|_: ()| Msg::SignOut),
        }
    }

    fn page(&self, route: &Route, app: AppContext) -> Html {
        let key = route.to_path();
        match route {
            Route::Login => html! { <LoginPage key={key} {app} /> },
            Route::Register => html! { <RegisterPage key={key} {app} /> },
            Route::Dashboard => html! { <DashboardPage key={key} {app} /> },
            Route::TemplateUpload => html! { <TemplateUploadPage key={key} {app} /> },
            Route::DataUpload { template_id } => html! {
                <DataUploadPage key={key} {app} template_id={template_id.clone()} />
            },
            Route::Designer { template_id, step } => html! {
                <DesignerPage key={key} {app} template_id={template_id.clone()} step={step.clone()} />
            },
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let api = ApiClient::new(config::api_base());
        api.on_unauthorized(ctx.link().callback(|_: ()| Msg::Unauthorized));
        let mut app = Self {
            session: SessionState::Initializing,
            route: router::current_route(),
            api,
            uploads: UploadedDataStore::new(),
            _popstate: router::listen(ctx.link().callback(|_: ()| Msg::LocationChanged)),
        };
        app.apply_guards();
        app
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let api = self.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::SessionReady(session::initialize(&api).await));
            });
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionReady(state) => {
                debug!("session initialised: {:?}", state.phase());
                self.session = state;
            }
            Msg::LocationChanged => {
                self.route = router::current_route();
            }
            Msg::Navigate(route) => {
                if self.route.as_ref() == Some(&route) {
                    return false;
                }
                if window_is_dirty() && !confirm("You have unsaved changes. Leave this page?") {
                    return false;
                }
                set_window_dirty_flag(false);
                router::push(&route);
                self.route = Some(route);
            }
            Msg::SignedIn(user) => {
                self.session = SessionState::Authenticated(user);
                router::push(&Route::Dashboard);
                self.route = Some(Route::Dashboard);
            }
            Msg::SignOut => {
                session::clear_credentials();
                set_window_dirty_flag(false);
                info!("signed out");
                show_toast("Logged out successfully!");
                self.session = SessionState::Anonymous;
            }
            Msg::Unauthorized => {
                if self.session == SessionState::Anonymous {
                    return false;
                }
                info!("session rejected by the server");
                set_window_dirty_flag(false);
                self.session = SessionState::Anonymous;
            }
        }
        self.apply_guards();
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let app = self.context(ctx);
        let navbar = html! {
            <Navbar
                user={app.user.clone()}
                navigate={app.navigate.clone()}
                on_logout={app.on_sign_out.clone()}
            />
        };
        let body = match resolve(self.route.clone(), self.session.phase()) {
            Resolution::Render(route) => self.page(&route, app),
            Resolution::Loading | Resolution::Redirect(_) => {
                html! { <Spinner label="Loading..." full_page={true} /> }
            }
        };

        html! {
            <div class="app">
                { navbar }
                <main class="app-main">{ body }</main>
            </div>
        }
    }
}
