use bloodwork::application::ports::LlmClient;
use bloodwork::infrastructure::llm::MockLlmClient;

#[tokio::test]
async fn given_prompt_when_completing_then_echoes_query_and_context_size() {
    let answer = MockLlmClient
        .complete("report text", "Is my TSH normal?")
        .await
        .unwrap();

    assert!(answer.contains("Is my TSH normal?"));
    assert!(answer.contains("11 characters"));
}
