use common::model::auth::User;
use common::route::Route;
use yew::prelude::*;

use super::link::Link;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub user: Option<User>,
    pub navigate: Callback<Route>,
    pub on_logout: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let navigate = props.navigate.clone();
    let brand = html! {
        <span class="brand">
            <span class="material-icons">{"badge"}</span>
            <span class="brand-name">{"ID Card Generator"}</span>
        </span>
    };

    let Some(user) = &props.user else {
        return html! {
            <nav class="navbar">
                <Link to={Route::Login} navigate={navigate.clone()}>{ brand }</Link>
                <div class="nav-actions">
                    <Link to={Route::Login} navigate={navigate.clone()} class="btn btn-outline">{"Sign In"}</Link>
                    <Link to={Route::Register} navigate={navigate} class="btn btn-primary">{"Get Started"}</Link>
                </div>
            </nav>
        };
    };

    let on_logout = props.on_logout.reform(|_: MouseEvent| ());
    html! {
        <nav class="navbar">
            <Link to={Route::Dashboard} navigate={navigate.clone()}>{ brand }</Link>
            <div class="nav-actions">
                <Link to={Route::Dashboard} navigate={navigate.clone()} class="nav-link">{"Dashboard"}</Link>
                <Link to={Route::TemplateUpload} navigate={navigate} class="nav-link">{"Upload Template"}</Link>
                <span class="nav-user" title={user.email.clone()}>
                    <span class="material-icons">{"person"}</span>
                    { user.organization_name.clone() }
                </span>
                <button class="icon-btn" title="Logout" onclick={on_logout}>
                    <span class="material-icons">{"logout"}</span>
                    <span class="icon-label">{"Logout"}</span>
                </button>
            </div>
        </nav>
    }
}
