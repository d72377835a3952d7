/// Context keys shared by the concierge tasks
pub mod session_keys {
    pub const MOOD: &str = "mood";
    pub const LANGUAGE: &str = "language";
    pub const RECOMMENDATIONS: &str = "recommendations";
    pub const USER_INPUT: &str = "user_input";
}

/// Opening assistant message once recommendations are ready
pub fn greeting(mood: &str) -> String {
    format!(
        "Hi! I'm here to help you with any questions about the movies I recommended based on your mood: \"{mood}\". Feel free to ask me anything - like whether a movie is suitable for kids, where you can watch it, or if you want more details about the plot! 🍿"
    )
}
