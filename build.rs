use shadow_rs::ShadowBuilder;

fn main() {
    // Git and build metadata behind `reqscope --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}