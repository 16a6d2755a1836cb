// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Crop, MediaTransform, card_image_url};

const ROOM_IMAGE: &str = "https://res.cloudinary.com/innkeep/image/upload/v1712/rooms/suite.jpg";

#[test]
fn test_card_preset_segment() {
    assert_eq!(
        MediaTransform::card(800, 600).to_segment(),
        "w_800,h_600,c_fill,q_auto,f_auto"
    );
}

#[test]
fn test_segment_inserted_after_upload() {
    assert_eq!(
        card_image_url(ROOM_IMAGE, 400, 300),
        "https://res.cloudinary.com/innkeep/image/upload/w_400,h_300,c_fill,q_auto,f_auto/v1712/rooms/suite.jpg"
    );
}

#[test]
fn test_parameters_emitted_in_fixed_order() {
    let transform: MediaTransform = MediaTransform::new()
        .auto_format()
        .quality(80)
        .crop(Crop::Thumb)
        .height(120)
        .width(160);
    assert_eq!(transform.to_segment(), "w_160,h_120,c_thumb,q_80,f_auto");
}

#[test]
fn test_quality_clamped() {
    assert_eq!(MediaTransform::new().quality(0).to_segment(), "q_1");
    assert_eq!(MediaTransform::new().quality(250).to_segment(), "q_100");
}

#[test]
fn test_empty_transform_leaves_url_unchanged() {
    assert_eq!(MediaTransform::new().apply(ROOM_IMAGE), ROOM_IMAGE);
}

#[test]
fn test_foreign_urls_left_unchanged() {
    let url: &str = "https://images.example.com/upload/rooms/suite.jpg";
    assert_eq!(card_image_url(url, 400, 300), url);

    let no_upload: &str = "https://res.cloudinary.com/innkeep/image/fetch/suite.jpg";
    assert_eq!(card_image_url(no_upload, 400, 300), no_upload);
}
