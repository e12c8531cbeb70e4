fn main() {
    let _shadow = shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Generating build metadata should always success");
}
