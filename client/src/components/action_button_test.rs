use super::*;

#[test]
fn notice_uses_description_class() {
    assert_eq!(affordance_class(Affordance::Joined), "description");
}

#[test]
fn buttons_share_button_class() {
    assert_eq!(affordance_class(Affordance::Connect), "button");
    assert_eq!(affordance_class(Affordance::Join), "button");
    assert!(affordance_class(Affordance::Loading).starts_with("button"));
}
