//! Example: Healing diagrams embedded in generated text
//!
//! This example feeds a piece of model output with one clean, one repairable
//! and one hopeless diagram through the healer and prints what happened to
//! each of them.

use umlmend::{DiagramHealer, Outcome, config::AppConfig, strip_fragments};

const GENERATED: &str = r#"The service accepts a login request and checks it against the store.

@startuml
title "Login Flow"
participant User
participant AuthService
User -> AuthService : submit credentials
AuthService --> User : session token
@enduml

Orders are forwarded to the payment provider.

```
@startuml
Title: **Order Flow**
Actor Customer
participant "Payment Gateway" as Gateway
Gateway <-- Customer : pay (card)
@enduml
```

Finally, the architecture overview:

@startuml
skinparam monochrome true
[Frontend] ..> [Backend]
@enduml
"#;

fn main() {
    println!("Healing generated text...\n");

    // Allow the full repair budget
    let healer = DiagramHealer::new(AppConfig::default().with_max_attempts(3));
    let healed = healer.heal(GENERATED);

    for entry in &healed {
        let how = match entry.outcome() {
            Outcome::Clean => "valid as generated".to_string(),
            Outcome::Healed { attempts } => format!("healed after {attempts} attempt(s)"),
            Outcome::Fallback { reason } => format!("replaced by fallback ({reason})"),
        };
        println!("Fragment {}: {how}", entry.ordinal());

        for record in entry.attempts() {
            println!("  {:<12} {}", record.level(), record.verdict());
        }
        println!("{}\n", entry.diagram());
    }

    println!("Prose without diagrams:\n{}", strip_fragments(GENERATED));
}
