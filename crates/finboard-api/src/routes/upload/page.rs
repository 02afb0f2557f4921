//! Upload page rendering

use axum::http::HeaderMap;
use axum::response::Html;

pub async fn page_upload(headers: HeaderMap) -> Html<String> {
    let inner_content = r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Upload Transactions</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 max-w-xl'>
            <form hx-post='/upload' hx-encoding='multipart/form-data' hx-target='#upload-result' hx-swap='innerHTML'
                class='flex flex-col gap-4'>
                <input type='file' name='file' class='px-3 py-2 border rounded-lg'>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Upload</button>
            </form>
            <div id='upload-result' class='mt-4'></div>
        </div>"#;

    Html(crate::page_response(&headers, "Upload", "/", inner_content))
}
