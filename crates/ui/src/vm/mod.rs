mod exam_page;

pub use exam_page::ExamPage;
