/// Full handoff round trip inside one process: bind the loopback listener,
/// submit a payload to it through the form, print what arrived.
///
/// ```bash
/// cargo run --example handoff_roundtrip
/// ```
use token_handoff_rs::{
    FormInput, FormUi, HandoffForm, SubmitState, TokenPayload, TokenReceiver,
};

struct PrintUi;

impl FormUi for PrintUi {
    fn disable_submit(&mut self) {
        println!("   [ui] submit disabled");
    }

    fn apply_saved_style(&mut self) {
        println!("   [ui] saved style applied");
    }

    fn set_submit_label(&mut self, label: &str) {
        println!("   [ui] label -> {}", label);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Token Handoff Demo ===\n");

    println!("1. Binding loopback listener...");
    let mut receiver = TokenReceiver::bind(0).await?;
    println!("   Listening on {}\n", receiver.local_addr());

    println!("2. Submitting the form...");
    let input = FormInput {
        payload: TokenPayload {
            token: "demo-id-token".to_string(),
            email: "demo@example.com".to_string(),
            r_token: "demo-refresh-token".to_string(),
            client_id: "demo-client".to_string(),
            client_secret: "demo-secret".to_string(),
        },
        port: receiver.port().to_string(),
    };

    let mut form = HandoffForm::new(PrintUi);
    form.submit(&input).await?;
    assert_eq!(form.state(), SubmitState::Done);
    println!("   Form state: {}\n", form.state());

    println!("3. Listener side received:");
    let payload = receiver.recv().await.expect("listener closed early");
    println!("   email:    {}", payload.email);
    println!("   token:    {}", payload.token);
    println!("   clientID: {}\n", payload.client_id);

    receiver.close();
    println!("=== Demo Complete ===");
    Ok(())
}
