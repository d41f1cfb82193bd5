use yew::prelude::*;

use crate::chat::widget::ChatWidget;
use crate::config::{ChatSettings, SITE_NAME};
use crate::contact::enquiry_form::EnquiryForm;
use crate::dom::{anchor_callback, HeaderRef};
use crate::effects::cockpit::CockpitDisplay;
use crate::effects::counter::StatCounter;
use crate::effects::parallax::FloatingPlanes;
use crate::effects::reveal::{stagger, Reveal, RevealKind, REVEAL_STYLES};
use crate::effects::scroll_top::ScrollToTop;
use crate::milestone::flight_path::FlightPath;
use crate::pricing::pricing_section::PricingSection;

/// Section ids in page order; the header highlights whichever is current.
pub const SECTIONS: &[(&str, &str)] = &[
    ("home", "Home"),
    ("courses", "Courses"),
    ("journey", "Journey"),
    ("pricing", "Pricing"),
    ("about", "About"),
    ("contact", "Contact"),
];

pub fn section_ids() -> Vec<&'static str> {
    SECTIONS.iter().map(|(id, _)| *id).collect()
}

struct Course {
    icon: &'static str,
    title: &'static str,
    blurb: &'static str,
    points: &'static [&'static str],
}

const COURSES: &[Course] = &[
    Course {
        icon: "fas fa-book-open",
        title: "CPL Ground School",
        blurb: "Complete preparation for all DGCA CPL theory papers.",
        points: &["Air Navigation", "Meteorology", "Air Regulations", "Technical General & Specific"],
    },
    Course {
        icon: "fas fa-broadcast-tower",
        title: "RTR (Aero)",
        blurb: "Radio telephony training for the WPC licence exam.",
        points: &["Phraseology drills", "Mock oral boards", "Transmission practice"],
    },
    Course {
        icon: "fas fa-plane-departure",
        title: "ATPL Theory",
        blurb: "Bridge from CPL to airline transport pilot knowledge.",
        points: &["Advanced performance", "Flight planning", "Human performance"],
    },
];

const FEATURES: &[(&str, &str, &str)] = &[
    ("fas fa-user-tie", "Airline Instructors", "Lessons from captains who fly the line today."),
    ("fas fa-laptop", "Online & Classroom", "Attend live in Delhi or from anywhere online."),
    ("fas fa-clipboard-check", "Exam-Focused Tests", "Question banks modelled on recent DGCA papers."),
    ("fas fa-headset", "Doubt Support", "One-on-one sessions whenever a topic does not click."),
];

const ABOUT: &[(&str, &str, &str)] = &[
    ("fas fa-bullseye", "Our Mission", "Make the path to the cockpit clear, honest and affordable."),
    ("fas fa-eye", "Our Vision", "Every motivated student ready for the right seat of an airliner."),
    ("fas fa-heart", "Our Values", "Safety first, rigorous teaching and genuine mentorship."),
];

const CONTACT_CARDS: &[(&str, &str, &str)] = &[
    ("fas fa-map-marker-alt", "Visit Us", "Sector 21, Dwarka, New Delhi"),
    ("fas fa-phone", "Call Us", "+91 98100 00000"),
    ("fas fa-envelope", "Email Us", "admissions@skyward.academy"),
];

const STATS: &[(&str, &str)] = &[
    ("500+", "Students Trained"),
    ("95%", "DGCA Pass Rate"),
    ("50+", "Airline Placements"),
    ("15+", "Years of Teaching"),
];

#[function_component(Hero)]
fn hero() -> Html {
    let header = use_context::<HeaderRef>().unwrap_or_default();

    html! {
        <section id="home" class="hero">
            <FloatingPlanes />
            <div class="hero-content">
                <div class="hero-text">
                    <h1 class="hero-title">{"Your Journey to the "}<span class="highlight">{"Cockpit"}</span>{" Starts Here"}</h1>
                    <p class="hero-subtitle">
                        {"DGCA CPL ground school taught by airline pilots. Clear the exams, then fly."}
                    </p>
                    <div class="hero-buttons">
                        <a href="#courses" class="btn-primary" onclick={anchor_callback("courses", &header)}>
                            {"Explore Courses"}
                        </a>
                        <a href="#contact" class="btn-secondary" onclick={anchor_callback("contact", &header)}>
                            {"Book a Free Counselling"}
                        </a>
                    </div>
                </div>
                <CockpitDisplay />
            </div>
        </section>
    }
}

#[function_component(Stats)]
fn stats() -> Html {
    html! {
        <section class="stats">
            <div class="container stats-grid">
                { for STATS.iter().map(|(label, caption)| html! {
                    <StatCounter label={*label} caption={*caption} />
                }) }
            </div>
        </section>
    }
}

#[function_component(Courses)]
fn courses() -> Html {
    let header = use_context::<HeaderRef>().unwrap_or_default();

    html! {
        <section id="courses" class="courses">
            <div class="container">
                <h2 class="section-title">{"Our Courses"}</h2>
                <div class="courses-grid">
                    { for COURSES.iter().enumerate().map(|(i, course)| html! {
                        <Reveal class="course-card" delay_ms={stagger(i, 200)}>
                            <div class="course-icon"><i class={course.icon}></i></div>
                            <h3>{ course.title }</h3>
                            <p>{ course.blurb }</p>
                            <ul>
                                { for course.points.iter().map(|p| html! { <li>{ *p }</li> }) }
                            </ul>
                            <a href="#contact" class="course-btn" onclick={anchor_callback("contact", &header)}>
                                {"Enquire Now"}
                            </a>
                        </Reveal>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(Features)]
fn features() -> Html {
    html! {
        <section class="features">
            <div class="container">
                <h2 class="section-title">{"Why Train With Us"}</h2>
                <div class="features-grid">
                    { for FEATURES.iter().enumerate().map(|(i, (icon, title, text))| html! {
                        <Reveal class="feature-item" kind={RevealKind::alternating(i)} delay_ms={stagger(i, 100)}>
                            <i class={*icon}></i>
                            <h3>{ *title }</h3>
                            <p>{ *text }</p>
                        </Reveal>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(About)]
fn about() -> Html {
    html! {
        <section id="about" class="about">
            <div class="container">
                <h2 class="section-title">{ format!("About {}", SITE_NAME) }</h2>
                <div class="about-grid">
                    { for ABOUT.iter().enumerate().map(|(i, (icon, title, text))| html! {
                        <Reveal class="about-card" delay_ms={stagger(i, 300)}>
                            <i class={*icon}></i>
                            <h3>{ *title }</h3>
                            <p>{ *text }</p>
                        </Reveal>
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(Contact)]
fn contact() -> Html {
    html! {
        <section id="contact" class="contact">
            <div class="container">
                <h2 class="section-title">{"Get in Touch"}</h2>
                <div class="contact-grid">
                    <div class="contact-info">
                        { for CONTACT_CARDS.iter().enumerate().map(|(i, (icon, title, text))| html! {
                            <Reveal class="contact-card" kind={RevealKind::SlideLeft} delay_ms={stagger(i, 200)}>
                                <i class={*icon}></i>
                                <div>
                                    <h4>{ *title }</h4>
                                    <p>{ *text }</p>
                                </div>
                            </Reveal>
                        }) }
                    </div>
                    <Reveal kind={RevealKind::SlideRight}>
                        <EnquiryForm />
                    </Reveal>
                </div>
            </div>
        </section>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let header = use_context::<HeaderRef>().unwrap_or_default();

    html! {
        <footer class="footer">
            <div class="container footer-content">
                <div class="footer-brand">
                    <i class="fas fa-plane"></i>
                    <span>{ SITE_NAME }</span>
                </div>
                <nav class="footer-links">
                    { for SECTIONS.iter().map(|(id, label)| html! {
                        <a href={format!("#{}", id)} onclick={anchor_callback(*id, &header)}>{ *label }</a>
                    }) }
                </nav>
                <p class="footer-note">{ format!("© {} - DGCA CPL ground training.", SITE_NAME) }</p>
            </div>
        </footer>
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let chat_settings = use_memo(|_| ChatSettings::from_build_env(), ());

    html! {
        <>
            <style>{ LANDING_STYLES }</style>
            <style>{ REVEAL_STYLES }</style>
            <Hero />
            <Stats />
            <Courses />
            <Features />
            <section id="journey" class="journey">
                <div class="container">
                    <h2 class="section-title">{"Your Flight Path to the Airlines"}</h2>
                    <p class="section-subtitle">{"Click a milestone, or use the arrow keys, to follow the route."}</p>
                    <FlightPath />
                </div>
            </section>
            <section id="pricing" class="pricing">
                <div class="container">
                    <h2 class="section-title">{"Transparent Pricing"}</h2>
                    <PricingSection />
                </div>
            </section>
            <About />
            <Contact />
            <Footer />
            <ScrollToTop />
            <ChatWidget settings={(*chat_settings).clone()} />
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_ids_are_unique() {
        let mut ids = section_ids();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn stat_labels_are_countable() {
        use crate::effects::counter::CounterAnimation;
        assert!(STATS.iter().all(|(label, _)| CounterAnimation::from_label(label).is_some()));
    }
}

pub(crate) const LANDING_STYLES: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;
    background: linear-gradient(135deg, #0f172a 0%, #1e3a8a 50%, #0f172a 100%);
    color: #fff;
    line-height: 1.6;
    overflow-x: hidden;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 0 20px;
}

section {
    padding: 100px 0;
}

.section-title {
    font-size: 2.5rem;
    text-align: center;
    margin-bottom: 1rem;
}

.section-subtitle {
    text-align: center;
    color: rgba(255, 255, 255, 0.7);
    margin-bottom: 3rem;
}

/* Header */
.header {
    position: fixed;
    top: 0;
    left: 0;
    right: 0;
    z-index: 1000;
    padding: 20px 0;
    transition: background 0.3s ease, padding 0.3s ease;
}

.header.scrolled {
    background: rgba(15, 23, 42, 0.85);
    backdrop-filter: blur(20px);
    padding: 12px 0;
    box-shadow: 0 4px 30px rgba(0, 0, 0, 0.3);
}

.navbar {
    display: flex;
    align-items: center;
    justify-content: space-between;
}

.nav-logo {
    display: flex;
    align-items: center;
    gap: 10px;
    font-size: 1.4rem;
    font-weight: 700;
    color: #fff;
    text-decoration: none;
}

.nav-menu {
    display: flex;
    gap: 30px;
    list-style: none;
}

.nav-link {
    color: rgba(255, 255, 255, 0.8);
    text-decoration: none;
    transition: color 0.3s ease;
}

.nav-link:hover,
.nav-link.active {
    color: #60a5fa;
}

.hamburger {
    display: none;
    flex-direction: column;
    gap: 5px;
    background: none;
    border: none;
    cursor: pointer;
}

.hamburger span {
    width: 25px;
    height: 3px;
    background: #fff;
    transition: transform 0.3s ease, opacity 0.3s ease;
}

.hamburger.active span:nth-child(1) { transform: rotate(45deg) translate(5px, 5px); }
.hamburger.active span:nth-child(2) { opacity: 0; }
.hamburger.active span:nth-child(3) { transform: rotate(-45deg) translate(6px, -6px); }

@media (max-width: 768px) {
    .hamburger { display: flex; }
    .nav-menu {
        position: fixed;
        top: 70px;
        left: -100%;
        width: 100%;
        flex-direction: column;
        align-items: center;
        padding: 30px 0;
        background: rgba(15, 23, 42, 0.97);
        transition: left 0.3s ease;
    }
    .nav-menu.active { left: 0; }
}

/* Hero */
.hero {
    position: relative;
    min-height: 100vh;
    display: flex;
    align-items: center;
    overflow: hidden;
}

.hero-content {
    max-width: 1200px;
    margin: 0 auto;
    padding: 0 20px;
    display: grid;
    grid-template-columns: 1.2fr 1fr;
    gap: 60px;
    align-items: center;
}

.hero-title {
    font-size: 3.5rem;
    line-height: 1.2;
    margin-bottom: 1.5rem;
}

.highlight {
    background: linear-gradient(90deg, #60a5fa, #a78bfa);
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
}

.hero-subtitle {
    font-size: 1.2rem;
    color: rgba(255, 255, 255, 0.8);
    margin-bottom: 2rem;
}

.hero-buttons {
    display: flex;
    gap: 20px;
    flex-wrap: wrap;
}

.btn-primary,
.btn-secondary,
.course-btn,
.pricing-btn,
.submit-btn {
    display: inline-flex;
    align-items: center;
    gap: 8px;
    padding: 14px 30px;
    border-radius: 50px;
    border: none;
    font-size: 1rem;
    font-weight: 600;
    cursor: pointer;
    text-decoration: none;
    transition: transform 0.3s ease, box-shadow 0.3s ease;
}

.btn-primary,
.pricing-btn,
.submit-btn {
    background: linear-gradient(135deg, #3b82f6, #8b5cf6);
    color: #fff;
}

.btn-secondary,
.course-btn {
    background: rgba(255, 255, 255, 0.1);
    border: 1px solid rgba(255, 255, 255, 0.3);
    color: #fff;
}

.btn-primary:hover,
.btn-secondary:hover,
.course-btn:hover,
.pricing-btn:hover:not(:disabled) {
    transform: translateY(-2px);
    box-shadow: 0 10px 30px rgba(59, 130, 246, 0.4);
}

.pricing-btn:disabled,
.submit-btn:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.ripple {
    position: absolute;
    border-radius: 50%;
    background: rgba(255, 255, 255, 0.4);
    transform: scale(0);
    animation: ripple 0.6s linear;
    pointer-events: none;
}

@keyframes ripple {
    to {
        transform: scale(4);
        opacity: 0;
    }
}

.floating-elements {
    position: absolute;
    inset: 0;
    pointer-events: none;
}

.floating-plane {
    position: absolute;
    font-size: 2rem;
    color: rgba(255, 255, 255, 0.15);
}

.plane-1 { top: 20%; left: 10%; }
.plane-2 { top: 60%; left: 80%; font-size: 3rem; }
.plane-3 { top: 80%; left: 30%; font-size: 1.5rem; }

.cockpit-display {
    display: grid;
    gap: 20px;
    padding: 30px;
    border-radius: 20px;
    background: rgba(255, 255, 255, 0.08);
    border: 1px solid rgba(255, 255, 255, 0.15);
    backdrop-filter: blur(20px);
    font-family: 'Courier New', monospace;
}

.instrument {
    display: flex;
    justify-content: space-between;
    padding: 15px 20px;
    border-radius: 10px;
    background: rgba(0, 0, 0, 0.35);
}

.instrument .label { color: #60a5fa; }
.instrument .value { color: #34d399; font-weight: 700; }

/* Stats */
.stats { padding: 60px 0; }

.stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 30px;
    text-align: center;
}

.stat-number {
    display: block;
    font-size: 3rem;
    font-weight: 800;
    color: #60a5fa;
}

.stat-label { color: rgba(255, 255, 255, 0.7); }

/* Cards */
.courses-grid,
.features-grid,
.about-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
    gap: 30px;
    margin-top: 3rem;
}

.course-card,
.feature-item,
.about-card,
.contact-card,
.pricing-card {
    padding: 35px;
    border-radius: 20px;
    background: rgba(255, 255, 255, 0.08);
    border: 1px solid rgba(255, 255, 255, 0.15);
    backdrop-filter: blur(20px);
    transition: box-shadow 0.3s ease, border-color 0.3s ease;
}

.course-card:hover,
.feature-item:hover,
.about-card:hover,
.pricing-card:hover {
    border-color: rgba(96, 165, 250, 0.5);
    box-shadow: 0 20px 40px rgba(0, 0, 0, 0.3);
}

.course-icon,
.feature-item > i,
.about-card > i {
    font-size: 2.2rem;
    color: #60a5fa;
    margin-bottom: 1rem;
}

.course-card ul {
    list-style: none;
    margin: 1rem 0 1.5rem;
}

.course-card li::before {
    content: "✈ ";
    color: #60a5fa;
}

/* Pricing */
.pricing-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
    gap: 30px;
    margin-top: 3rem;
}

.pricing-card {
    position: relative;
}

.pricing-card.featured {
    border-color: #8b5cf6;
}

.pricing-badge {
    position: absolute;
    top: -12px;
    right: 25px;
    padding: 4px 14px;
    border-radius: 20px;
    background: #8b5cf6;
    font-size: 0.8rem;
}

.price {
    font-size: 2.4rem;
    font-weight: 800;
    margin: 1rem 0;
}

.custom-price {
    display: inline-block;
    transition: transform 0.2s ease;
}

.custom-price.pop {
    transform: scale(1.1);
}

.pricing-features {
    list-style: none;
    margin-bottom: 1.5rem;
}

.subject-list {
    display: grid;
    gap: 10px;
    margin-bottom: 1.5rem;
}

.subject-checkbox {
    display: flex;
    align-items: center;
    gap: 10px;
    cursor: pointer;
}

.subject-name { flex: 1; }
.subject-price { color: #60a5fa; }

/* Contact */
.contact-grid {
    display: grid;
    grid-template-columns: 1fr 1.5fr;
    gap: 40px;
    margin-top: 3rem;
}

.contact-info {
    display: grid;
    gap: 20px;
    align-content: start;
}

.contact-card {
    display: flex;
    gap: 20px;
    align-items: center;
}

.contact-card > i {
    font-size: 1.6rem;
    color: #60a5fa;
}

.contact-form,
.form-success {
    padding: 35px;
    border-radius: 20px;
    background: rgba(255, 255, 255, 0.08);
    border: 1px solid rgba(255, 255, 255, 0.15);
}

.form-row {
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 20px;
}

.form-group {
    display: flex;
    flex-direction: column;
    gap: 6px;
    margin-bottom: 20px;
}

.form-group input,
.form-group select,
.form-group textarea {
    padding: 12px 16px;
    border-radius: 10px;
    border: 1px solid rgba(255, 255, 255, 0.2);
    background: rgba(255, 255, 255, 0.05);
    color: #fff;
    font: inherit;
}

.form-group input:focus,
.form-group select:focus,
.form-group textarea:focus {
    outline: none;
    border-color: #60a5fa;
}

.form-group label {
    transition: color 0.2s ease;
}

.form-group.focused label {
    color: #60a5fa;
}

.form-group .error {
    border-color: #ef4444;
}

.error-message {
    min-height: 1em;
    font-size: 0.85rem;
    color: #ef4444;
}

.checkbox-label {
    display: flex;
    gap: 10px;
    align-items: center;
}

.char-counter {
    text-align: right;
    font-size: 0.85rem;
    color: rgba(255, 255, 255, 0.7);
}

.char-count.warning { color: #f59e0b; }
.char-count.limit { color: #ef4444; }

.form-success {
    text-align: center;
}

.form-success > i {
    font-size: 3rem;
    color: #10b981;
    margin-bottom: 1rem;
}

/* Footer */
.footer {
    padding: 40px 0;
    border-top: 1px solid rgba(255, 255, 255, 0.1);
}

.footer-content {
    display: flex;
    flex-wrap: wrap;
    justify-content: space-between;
    align-items: center;
    gap: 20px;
}

.footer-links {
    display: flex;
    gap: 20px;
}

.footer-links a {
    color: rgba(255, 255, 255, 0.7);
    text-decoration: none;
}

.footer-note {
    width: 100%;
    text-align: center;
    color: rgba(255, 255, 255, 0.5);
    font-size: 0.85rem;
}

.scroll-to-top {
    position: fixed;
    bottom: 30px;
    left: 30px;
    width: 50px;
    height: 50px;
    border-radius: 50%;
    border: none;
    background: linear-gradient(135deg, #3b82f6, #8b5cf6);
    color: #fff;
    cursor: pointer;
    opacity: 0;
    visibility: hidden;
    transition: opacity 0.3s ease, visibility 0.3s ease;
    z-index: 999;
}

.scroll-to-top.visible {
    opacity: 1;
    visibility: visible;
}

@media (max-width: 768px) {
    .hero-content,
    .contact-grid,
    .form-row {
        grid-template-columns: 1fr;
    }
    .hero-title { font-size: 2.4rem; }
}
"#;
