pub mod login_form;
pub mod review_form;
pub mod reviews_list;
pub mod star_rating;
