use yew::prelude::*;

use crate::config::CrmConfig;
use crate::form::PropertyEvaluationForm;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(CrmConfig::from_page);

    html! {
      <div class="site">
        <section id="evaluation" class="section">
          <div class="wrap">
            <h2 class="h2">{ "Free Property Evaluation" }</h2>
            <p class="sub">
              { "Submit your property details below and we’ll provide a quick evaluation to help you understand its current market potential." }
            </p>
            <div class="card">
              <PropertyEvaluationForm config={(*config).clone()} />
            </div>
          </div>
        </section>

        <footer class="footer">
          <div class="wrap footer-grid">
            <div>
              <h3 class="brand">{ "ERA Property Solutions" }</h3>
              <p class="small">
                { "We are a local Texas home‑buying company. We buy houses for cash in any condition. This site is for informational purposes only." }
              </p>
            </div>
            <nav class="legal" aria-label="Legal">
              <a href="/privacy.md" target="_blank" rel="noopener noreferrer">{ "Privacy Policy" }</a>
              <a href="/terms.md" target="_blank" rel="noopener noreferrer">{ "Terms of Service" }</a>
            </nav>
          </div>
        </footer>
      </div>
    }
}
