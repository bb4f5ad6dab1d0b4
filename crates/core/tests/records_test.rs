use chrono::Utc;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use carport_core::models::{
    address::{Address, AddressRequest},
    admin_email::AdminEmailRequest,
    inquiry::{CreateInquiryRequest, Inquiry, UpdateInquiryRequest},
    order::CreateOrderRequest,
    stnk::{StnkNoteRequest, StnkPhotoRequest},
};

fn saved_address() -> Address {
    Address {
        id: 4,
        user_id: 10,
        title: "Rumah".to_string(),
        location: "Jl. Merdeka 17, Bandung".to_string(),
        created_at: Utc::now(),
    }
}

fn inquiry() -> Inquiry {
    Inquiry {
        id: 1,
        car_brand: "Toyota".to_string(),
        car_year: "2015".to_string(),
        problem: "Engine knocks when cold".to_string(),
        phone: "081234567890".to_string(),
        resolved: false,
        created_at: Utc::now(),
    }
}

fn order_request(address: Option<&str>) -> CreateOrderRequest {
    serde_json::from_value(json!({
        "car_id": 7,
        "service_type": "HOME_SERVICE",
        "address": address,
        "address_id": 4,
        "order_time": "2024-05-06T02:00:00Z"
    }))
    .unwrap()
}

#[rstest]
#[case("Rumah", "Jl. Merdeka 17", true)]
#[case("  ", "Jl. Merdeka 17", false)]
#[case("Kantor", "", false)]
fn test_address_request_validation(#[case] title: &str, #[case] location: &str, #[case] valid: bool) {
    let request = AddressRequest {
        title: title.to_string(),
        location: location.to_string(),
    };
    assert_eq!(request.validate().is_ok(), valid);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn test_blank_order_address_uses_saved_one(#[case] typed: Option<&str>) {
    let mut request = order_request(typed);
    assert_eq!(request.address_id, Some(4));

    request.use_saved_address(&saved_address());

    assert_eq!(request.address.as_deref(), Some("Jl. Merdeka 17, Bandung"));
}

#[test]
fn test_typed_order_address_wins() {
    let mut request = order_request(Some("Parkiran Mall"));

    request.use_saved_address(&saved_address());

    assert_eq!(request.address.as_deref(), Some("Parkiran Mall"));
}

#[test]
fn test_stnk_photo_is_required() {
    let blank = StnkPhotoRequest {
        photo_url: " ".to_string(),
    };
    assert!(blank.validate().is_err());

    let photo = StnkPhotoRequest {
        photo_url: "https://cdn.example.com/stnk/1.jpg".to_string(),
    };
    assert!(photo.validate().is_ok());
}

#[test]
fn test_stnk_note_defaults_to_empty() {
    let note: StnkNoteRequest = serde_json::from_value(json!({})).unwrap();
    assert_eq!(note.description, "");
}

#[rstest]
#[case::complete("Honda", "2019", "AC blows warm air", "081234567890", true)]
#[case::missing_brand("", "2019", "AC blows warm air", "081234567890", false)]
#[case::missing_problem("Honda", "2019", "  ", "081234567890", false)]
#[case::short_phone("Honda", "2019", "AC blows warm air", "0812", false)]
fn test_inquiry_validation(
    #[case] car_brand: &str,
    #[case] car_year: &str,
    #[case] problem: &str,
    #[case] phone: &str,
    #[case] valid: bool,
) {
    let request = CreateInquiryRequest {
        car_brand: car_brand.to_string(),
        car_year: car_year.to_string(),
        problem: problem.to_string(),
        phone: phone.to_string(),
    };
    assert_eq!(request.validate().is_ok(), valid);
}

#[test]
fn test_inquiry_update_keeps_blank_fields() {
    let update = UpdateInquiryRequest {
        car_brand: Some("  ".to_string()),
        problem: Some(" Brakes squeal ".to_string()),
        ..UpdateInquiryRequest::default()
    };
    assert!(update.validate().is_ok());

    let updated = update.apply(&inquiry());

    assert_eq!(updated.car_brand, "Toyota");
    assert_eq!(updated.car_year, "2015");
    assert_eq!(updated.problem, "Brakes squeal");
    assert_eq!(updated.id, 1);
    assert!(!updated.resolved);
}

#[test]
fn test_inquiry_update_checks_new_phone() {
    let update = UpdateInquiryRequest {
        phone: Some("123".to_string()),
        ..UpdateInquiryRequest::default()
    };
    assert!(update.validate().is_err());
}

#[test]
fn test_admin_email_is_normalized() {
    let request = AdminEmailRequest {
        email: "  Service.Desk@Carport.ID ".to_string(),
    };
    assert_eq!(request.normalized().unwrap(), "service.desk@carport.id");

    let invalid = AdminEmailRequest {
        email: "not-an-address".to_string(),
    };
    assert!(invalid.normalized().is_err());
}
