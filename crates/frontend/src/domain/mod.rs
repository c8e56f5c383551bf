pub mod a001_questionnaire;
